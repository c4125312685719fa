// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Commission calculation for simulated fills.

use fathom_core::correctness::{FAILED, check_in_range_inclusive_f64};
use fathom_model::{
    identifiers::Symbol,
    types::{Currency, Money, Price, Quantity},
};

/// Calculates commissions as basis points of the converted fill notional.
#[derive(Clone, Debug)]
pub struct CommissionModel {
    /// The commission rate in basis points of notional value.
    rate_bp: f64,
}

impl CommissionModel {
    /// The default commission rate (basis points of notional value).
    pub const DEFAULT_RATE_BP: f64 = 0.20;

    /// Creates a new [`CommissionModel`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate_bp` is negative or not finite.
    pub fn new(rate_bp: f64) -> anyhow::Result<Self> {
        check_in_range_inclusive_f64(rate_bp, 0.0, f64::MAX, "rate_bp")?;
        Ok(Self { rate_bp })
    }

    /// Returns the commission for a fill of `quantity` at `fill_price`,
    /// converted into `currency` at the given `exchange_rate`.
    ///
    /// The commission is never negative.
    #[must_use]
    pub fn calculate(
        &self,
        _symbol: Symbol,
        quantity: Quantity,
        fill_price: Price,
        exchange_rate: f64,
        currency: Currency,
    ) -> Money {
        let notional = quantity.as_f64() * fill_price.as_f64() * exchange_rate;
        let commission = (notional * self.rate_bp / 10_000.0).abs();
        Money::new(commission, currency)
    }
}

impl Default for CommissionModel {
    /// Creates a new default [`CommissionModel`] instance with
    /// [`Self::DEFAULT_RATE_BP`].
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_BP).expect(FAILED)
    }
}

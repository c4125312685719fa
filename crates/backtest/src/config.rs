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

//! Configuration for the simulated broker.

use std::path::PathBuf;

use fathom_model::{
    identifiers::AccountId,
    types::{Currency, Money},
};

use crate::models::CommissionModel;

/// Configuration for a [`SimulatedBroker`](crate::broker::SimulatedBroker) instance.
#[derive(Clone, Debug)]
pub struct SimulatedBrokerConfig {
    /// The account ID reported on account state events.
    pub account_id: AccountId,
    /// The single currency the account is denominated in.
    pub account_currency: Currency,
    /// The account capital at the start of the backtest.
    pub starting_capital: Money,
    /// If `true`, PnL and rollover are computed but never alter account capital.
    pub frozen_account: bool,
    /// The commission rate in basis points of fill notional.
    pub commission_rate_bp: f64,
    /// The spread markup applied to rollover interest.
    pub rollover_spread: f64,
    /// Offset in minutes applied backwards from the 17:00 New York rollover
    /// time. The origin of the 56 minute default is undocumented.
    pub rollover_time_offset_mins: i64,
    /// Path to the short-term interest rate CSV file, if rollover interest is
    /// to be applied.
    pub short_term_interest_csv_path: Option<PathBuf>,
}

impl SimulatedBrokerConfig {
    /// The default offset in minutes applied backwards from 17:00 New York.
    pub const DEFAULT_ROLLOVER_TIME_OFFSET_MINS: i64 = 56;
}

impl Default for SimulatedBrokerConfig {
    /// Creates a new default [`SimulatedBrokerConfig`]: an unfrozen 1,000,000
    /// USD account with the default commission rate and no rollover rate table.
    fn default() -> Self {
        Self {
            account_id: AccountId::new("SIM-001"),
            account_currency: Currency::USD(),
            starting_capital: Money::new(1_000_000.0, Currency::USD()),
            frozen_account: false,
            commission_rate_bp: CommissionModel::DEFAULT_RATE_BP,
            rollover_spread: 0.0,
            rollover_time_offset_mins: Self::DEFAULT_ROLLOVER_TIME_OFFSET_MINS,
            short_term_interest_csv_path: None,
        }
    }
}

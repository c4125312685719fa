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

//! Static per-symbol instrument definitions.

use std::fmt::{Display, Formatter};

use fathom_core::correctness::{FAILED, check_predicate_true};
use serde::{Deserialize, Serialize};

use crate::{
    enums::SecurityType,
    identifiers::Symbol,
    types::{Currency, Price, Quantity},
};

/// Represents the static metadata of a tradable instrument.
///
/// Instruments are immutable once defined; minimum stop and limit distances
/// are expressed in ticks and converted to price distances by the venue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// The instrument ticker symbol.
    pub symbol: Symbol,
    /// The currency the instrument is quoted in.
    pub quote_currency: Currency,
    /// The broad security type.
    pub security_type: SecurityType,
    /// The minimum price increment.
    pub tick_size: Price,
    /// The decimal precision of quoted prices.
    pub price_precision: u8,
    /// The minimum tradable quantity.
    pub min_trade_size: Quantity,
    /// The maximum tradable quantity.
    pub max_trade_size: Quantity,
    /// The minimum distance of a stop price from the market, in ticks.
    pub min_stop_distance: u32,
    /// The minimum distance of a limit price from the market, in ticks.
    pub min_limit_distance: u32,
}

impl Instrument {
    /// Creates a new [`Instrument`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the tick size precision does not match `price_precision`, or
    /// if `min_trade_size` exceeds `max_trade_size`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        symbol: Symbol,
        quote_currency: Currency,
        security_type: SecurityType,
        tick_size: Price,
        price_precision: u8,
        min_trade_size: Quantity,
        max_trade_size: Quantity,
        min_stop_distance: u32,
        min_limit_distance: u32,
    ) -> Self {
        check_predicate_true(
            tick_size.precision == price_precision,
            &format!(
                "tick size precision {} did not match price precision {price_precision}",
                tick_size.precision,
            ),
        )
        .expect(FAILED);
        check_predicate_true(
            min_trade_size <= max_trade_size,
            &format!(
                "minimum trade size {min_trade_size} exceeded maximum trade size {max_trade_size}",
            ),
        )
        .expect(FAILED);
        Self {
            symbol,
            quote_currency,
            security_type,
            tick_size,
            price_precision,
            min_trade_size,
            max_trade_size,
            min_stop_distance,
            min_limit_distance,
        }
    }

    /// Returns `true` if the instrument is a foreign exchange currency pair.
    #[must_use]
    pub fn is_forex(&self) -> bool {
        self.security_type == SecurityType::Forex
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", stringify!(Instrument), self.symbol)
    }
}

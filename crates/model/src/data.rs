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

//! Market data types consumed by the execution simulator.

use std::fmt::{Display, Formatter};

use fathom_core::UnixNanos;
use fathom_core::correctness::{FAILED, check_predicate_true};
use serde::{Deserialize, Serialize};

use crate::{enums::PriceType, identifiers::Symbol, types::Price};

/// Represents a single top-of-book quote in a market.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTick {
    /// The quoted instrument symbol.
    pub symbol: Symbol,
    /// The top-of-book bid price.
    pub bid: Price,
    /// The top-of-book ask price.
    pub ask: Price,
    /// UNIX timestamp (nanoseconds) when the quote event occurred.
    pub ts_event: UnixNanos,
}

impl QuoteTick {
    /// Creates a new [`QuoteTick`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `bid` and `ask` have different precisions.
    #[must_use]
    pub fn new(symbol: Symbol, bid: Price, ask: Price, ts_event: UnixNanos) -> Self {
        check_predicate_true(
            bid.precision == ask.precision,
            &format!(
                "bid precision {} did not match ask precision {}",
                bid.precision, ask.precision,
            ),
        )
        .expect(FAILED);
        Self {
            symbol,
            bid,
            ask,
            ts_event,
        }
    }

    /// Returns the price for the given `price_type` extracted from this quote.
    ///
    /// # Panics
    ///
    /// Panics if `price_type` is not `BID`, `ASK` or `MID`.
    #[must_use]
    pub fn extract_price(&self, price_type: PriceType) -> Price {
        match price_type {
            PriceType::Bid => self.bid,
            PriceType::Ask => self.ask,
            PriceType::Mid => Price::from_raw((self.bid.raw + self.ask.raw) / 2, self.bid.precision),
            _ => panic!("cannot extract price for `PriceType` {price_type}"),
        }
    }
}

impl Display for QuoteTick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.symbol, self.bid, self.ask, self.ts_event)
    }
}

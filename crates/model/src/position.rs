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

//! Represents a position in a market.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    enums::{MarketPosition, OrderSide},
    identifiers::{PositionId, Symbol},
    types::{Price, Quantity},
};

/// Represents a position in a market, opened by an entry order fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The position ID.
    pub id: PositionId,
    /// The instrument symbol.
    pub symbol: Symbol,
    /// The current market side of the position.
    pub market_position: MarketPosition,
    /// The open quantity.
    pub quantity: Quantity,
    /// The average price the position was opened at.
    pub average_open_price: Price,
    /// The side of the order which opened the position.
    pub entry_direction: OrderSide,
}

impl Position {
    /// Creates a new [`Position`] instance.
    #[must_use]
    pub const fn new(
        id: PositionId,
        symbol: Symbol,
        market_position: MarketPosition,
        quantity: Quantity,
        average_open_price: Price,
        entry_direction: OrderSide,
    ) -> Self {
        Self {
            id,
            symbol,
            market_position,
            quantity,
            average_open_price,
            entry_direction,
        }
    }

    /// Returns `true` if the position has no market exposure.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.market_position == MarketPosition::Flat
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, {} {} {} @ {})",
            stringify!(Position),
            self.id,
            self.market_position,
            self.quantity.to_formatted_string(),
            self.symbol,
            self.average_open_price,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_and_is_flat() {
        let position = Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        );
        assert!(!position.is_flat());
        assert_eq!(
            position.to_string(),
            "Position(id=P-1, LONG 100_000 EURUSD @ 1.1000)",
        );
    }
}

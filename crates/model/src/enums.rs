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

//! Defines enumerations for the trading domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, FromRepr};

/// The side of an order in a market.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// The order is a BUY.
    Buy = 1,
    /// The order is a SELL.
    Sell = 2,
}

/// The type of order.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// A market order to buy or sell at the best available price in the current market.
    Market = 1,
    /// A limit order to buy or sell at a specific price or better.
    Limit = 2,
    /// A stop market order which becomes a market order once the stop price is reached.
    Stop = 3,
    /// A stop limit order which becomes a limit order once the stop price is reached.
    StopLimit = 4,
    /// A market-if-touched order which becomes a market order once the touch price is reached.
    MarketIfTouched = 5,
}

impl OrderType {
    /// Returns `true` if the order type triggers off a stop price
    /// (STOP, STOP_LIMIT or MARKET_IF_TOUCHED).
    #[must_use]
    pub const fn is_stop_kind(&self) -> bool {
        matches!(self, Self::Stop | Self::StopLimit | Self::MarketIfTouched)
    }
}

/// The status for a specific order.
///
/// An order is considered _working_ only in the `WORKING` status, and
/// _completed_ in any of the terminal `FILLED`, `CANCELED`, `REJECTED` or
/// `EXPIRED` status.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order is instantiated within the system but not yet submitted.
    Initialized = 1,
    /// The order was submitted to the (simulated) broker.
    Submitted = 2,
    /// The order was acknowledged by the broker as received and valid.
    Accepted = 3,
    /// The order is resting at the venue and eligible for execution.
    Working = 4,
    /// The order has been completely filled (terminal).
    Filled = 5,
    /// The order was canceled (terminal).
    Canceled = 6,
    /// The order was rejected (terminal).
    Rejected = 7,
    /// The order reached its expire time (terminal).
    Expired = 8,
}

impl OrderStatus {
    /// Returns `true` if the status is terminal.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled | Self::Rejected | Self::Expired)
    }
}

/// The time-in-force instruction for an order.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good-till-canceled.
    Gtc = 1,
    /// Good-till-date (requires an expire time).
    Gtd = 2,
    /// Good for the trading session.
    Day = 3,
    /// Immediate-or-cancel.
    Ioc = 4,
    /// Fill-or-kill.
    Fok = 5,
}

/// The market side for a position.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketPosition {
    /// A neutral position, no exposure in the market.
    Flat = 0,
    /// A long position in the market.
    Long = 1,
    /// A short position in the market.
    Short = 2,
}

/// The broad security type of a tradable instrument.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityType {
    /// A foreign exchange currency pair.
    Forex = 1,
    /// An equity or share.
    Equity = 2,
    /// A futures contract.
    Future = 3,
    /// A contract for difference.
    Cfd = 4,
    /// A cryptocurrency pair.
    Crypto = 5,
}

/// The type of price for an instrument in a market.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    /// The best quoted price at which the market will buy.
    Bid = 1,
    /// The best quoted price at which the market will sell.
    Ask = 2,
    /// The midpoint between the bid and ask.
    Mid = 3,
    /// The last traded price.
    Last = 4,
}

/// The category of a currency.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrencyType {
    /// A currency issued by a government, not backed by a commodity.
    Fiat = 1,
    /// A cryptocurrency or crypto token.
    Crypto = 2,
}

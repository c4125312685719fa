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

//! The execution events emitted by the simulator.
//!
//! Events are a discriminated union delivered through a single sink; every
//! event carries a unique generated id and the virtual-clock timestamp at
//! which it was generated.

use std::fmt::{Display, Formatter};

use fathom_core::{UUID4, UnixNanos};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::{
    enums::{OrderSide, OrderType, TimeInForce},
    identifiers::{
        AccountId, ExecutionId, OrderId, OrderIdBroker, PositionIdBroker, Symbol,
    },
    types::{Currency, Money, Price, Quantity},
};

/// Represents an event which includes information on the state of the account.
///
/// This engine models no margin: both margin balances, the margin ratio and
/// the margin call status are reported as zero / `'N'`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountStateEvent {
    /// The account ID associated with the event.
    pub account_id: AccountId,
    /// The account base currency.
    pub currency: Currency,
    /// The current cash balance.
    pub cash_balance: Money,
    /// The cash balance at the start of the trading day.
    pub cash_start_day: Money,
    /// The cash movement for the current trading day.
    pub cash_activity_day: Money,
    /// The margin used for liquidation (always zero).
    pub margin_used_liquidation: Money,
    /// The margin used for maintenance (always zero).
    pub margin_used_maintenance: Money,
    /// The margin ratio (always zero).
    pub margin_ratio: Decimal,
    /// The margin call status (always `'N'`).
    pub margin_call_status: char,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

impl AccountStateEvent {
    /// Creates a new [`AccountStateEvent`] instance.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        account_id: AccountId,
        currency: Currency,
        cash_balance: Money,
        cash_start_day: Money,
        cash_activity_day: Money,
        event_id: UUID4,
        ts_event: UnixNanos,
    ) -> Self {
        Self {
            account_id,
            currency,
            cash_balance,
            cash_start_day,
            cash_activity_day,
            margin_used_liquidation: Money::zero(currency),
            margin_used_maintenance: Money::zero(currency),
            margin_ratio: Decimal::ZERO,
            margin_call_status: 'N',
            event_id,
            ts_event,
        }
    }
}

impl Display for AccountStateEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(account_id={}, cash_balance={}, cash_start_day={}, cash_activity_day={})",
            stringify!(AccountStateEvent),
            self.account_id,
            self.cash_balance,
            self.cash_start_day,
            self.cash_activity_day,
        )
    }
}

/// Represents an event where an order has been submitted to the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmitted {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has been accepted by the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAccepted {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The order ID assigned by the broker.
    pub order_id_broker: OrderIdBroker,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has been rejected by the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejected {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The reason the order was rejected.
    pub reason: Ustr,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order is working at the venue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWorking {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The order ID assigned by the broker.
    pub order_id_broker: OrderIdBroker,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The order label given by the strategy.
    pub label: Option<Ustr>,
    /// The order side.
    pub side: OrderSide,
    /// The order type.
    pub order_type: OrderType,
    /// The order quantity.
    pub quantity: Quantity,
    /// The order price.
    pub price: Price,
    /// The order time-in-force.
    pub time_in_force: TimeInForce,
    /// UNIX timestamp (nanoseconds) when the order expires, if GTD.
    pub expire_time: Option<UnixNanos>,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has been modified at the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModified {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The order ID assigned by the broker.
    pub order_id_broker: OrderIdBroker,
    /// The modified order quantity.
    pub modified_quantity: Quantity,
    /// The modified order price.
    pub modified_price: Price,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has been canceled at the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceled {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has reached its expire time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExpired {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where an order has been completely filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilled {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The execution ID assigned by the broker.
    pub execution_id: ExecutionId,
    /// The position ID assigned by the broker.
    pub position_id_broker: PositionIdBroker,
    /// The instrument symbol associated with the event.
    pub symbol: Symbol,
    /// The order side.
    pub side: OrderSide,
    /// The filled quantity.
    pub filled_quantity: Quantity,
    /// The average fill price.
    pub average_price: Price,
    /// The currency of the fill price.
    pub quote_currency: Currency,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// Represents an event where a cancel or modify request has been rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelRejected {
    /// The client order ID associated with the event.
    pub order_id: OrderId,
    /// The request the rejection responds to.
    pub rejected_response_to: Ustr,
    /// The reason the request was rejected.
    pub reason: Ustr,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
}

/// A sum of the order event kinds emitted by the simulator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEventAny {
    /// An order submitted event.
    Submitted(OrderSubmitted),
    /// An order accepted event.
    Accepted(OrderAccepted),
    /// An order rejected event.
    Rejected(OrderRejected),
    /// An order working event.
    Working(OrderWorking),
    /// An order modified event.
    Modified(OrderModified),
    /// An order canceled event.
    Canceled(OrderCanceled),
    /// An order expired event.
    Expired(OrderExpired),
    /// An order filled event.
    Filled(OrderFilled),
    /// A cancel/modify rejected event.
    CancelRejected(OrderCancelRejected),
}

impl OrderEventAny {
    /// Returns the client order ID associated with the event.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        match self {
            Self::Submitted(event) => event.order_id,
            Self::Accepted(event) => event.order_id,
            Self::Rejected(event) => event.order_id,
            Self::Working(event) => event.order_id,
            Self::Modified(event) => event.order_id,
            Self::Canceled(event) => event.order_id,
            Self::Expired(event) => event.order_id,
            Self::Filled(event) => event.order_id,
            Self::CancelRejected(event) => event.order_id,
        }
    }

    /// Returns the unique identifier for the event.
    #[must_use]
    pub const fn event_id(&self) -> UUID4 {
        match self {
            Self::Submitted(event) => event.event_id,
            Self::Accepted(event) => event.event_id,
            Self::Rejected(event) => event.event_id,
            Self::Working(event) => event.event_id,
            Self::Modified(event) => event.event_id,
            Self::Canceled(event) => event.event_id,
            Self::Expired(event) => event.event_id,
            Self::Filled(event) => event.event_id,
            Self::CancelRejected(event) => event.event_id,
        }
    }

    /// Returns the UNIX timestamp (nanoseconds) when the event occurred.
    #[must_use]
    pub const fn ts_event(&self) -> UnixNanos {
        match self {
            Self::Submitted(event) => event.ts_event,
            Self::Accepted(event) => event.ts_event,
            Self::Rejected(event) => event.ts_event,
            Self::Working(event) => event.ts_event,
            Self::Modified(event) => event.ts_event,
            Self::Canceled(event) => event.ts_event,
            Self::Expired(event) => event.ts_event,
            Self::Filled(event) => event.ts_event,
            Self::CancelRejected(event) => event.ts_event,
        }
    }
}

/// The single event union delivered to the execution event sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum Event {
    /// An account state event.
    Account(AccountStateEvent),
    /// An order lifecycle event.
    Order(OrderEventAny),
}

impl Event {
    /// Returns the unique identifier for the event.
    #[must_use]
    pub const fn event_id(&self) -> UUID4 {
        match self {
            Self::Account(event) => event.event_id,
            Self::Order(event) => event.event_id(),
        }
    }

    /// Returns the UNIX timestamp (nanoseconds) when the event occurred.
    #[must_use]
    pub const fn ts_event(&self) -> UnixNanos {
        match self {
            Self::Account(event) => event.ts_event,
            Self::Order(event) => event.ts_event(),
        }
    }
}

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

//! Order types for the trading domain model.

use std::fmt::{Display, Formatter};

use fathom_core::UnixNanos;
use fathom_core::correctness::{FAILED, check_predicate_true};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::{
    enums::{OrderSide, OrderStatus, OrderType, TimeInForce},
    identifiers::{OrderId, OrderIdBroker, Symbol},
    types::{Price, Quantity},
};

/// Represents an order in a market.
///
/// The `price` is the limit price for LIMIT orders and the trigger price for
/// stop-kind orders; MARKET orders carry no price. The broker order id is
/// assigned by the venue on acceptance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The client order ID.
    pub id: OrderId,
    /// The order ID assigned by the broker on acceptance.
    pub id_broker: Option<OrderIdBroker>,
    /// The instrument symbol to trade.
    pub symbol: Symbol,
    /// The order side.
    pub side: OrderSide,
    /// The order type.
    pub order_type: OrderType,
    /// The order quantity.
    pub quantity: Quantity,
    /// The order price (`None` for MARKET orders).
    pub price: Option<Price>,
    /// The order time-in-force.
    pub time_in_force: TimeInForce,
    /// UNIX timestamp (nanoseconds) when the order expires (GTD only).
    pub expire_time: Option<UnixNanos>,
    /// The free-form order label given by the strategy.
    pub label: Option<Ustr>,
    /// The current order status.
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new [`Order`] instance in the `INITIALIZED` status.
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - `quantity` is zero.
    /// - `price` is given for a MARKET order, or missing for any other type.
    /// - the time-in-force is GTD without an expire time (or vice versa).
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: OrderSide,
        order_type: OrderType,
        quantity: Quantity,
        price: Option<Price>,
        time_in_force: TimeInForce,
        expire_time: Option<UnixNanos>,
        label: Option<Ustr>,
    ) -> Self {
        check_predicate_true(!quantity.is_zero(), "order quantity was zero").expect(FAILED);
        check_predicate_true(
            (order_type == OrderType::Market) == price.is_none(),
            &format!("invalid price {price:?} for {order_type} order"),
        )
        .expect(FAILED);
        check_predicate_true(
            (time_in_force == TimeInForce::Gtd) == expire_time.is_some(),
            "GTD orders require an expire time (and only GTD orders may carry one)",
        )
        .expect(FAILED);
        Self {
            id,
            id_broker: None,
            symbol,
            side,
            order_type,
            quantity,
            price,
            time_in_force,
            expire_time,
            label,
            status: OrderStatus::Initialized,
        }
    }

    /// Returns `true` if the order is resting at the venue and eligible for execution.
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.status == OrderStatus::Working
    }

    /// Returns `true` if the order is in a terminal status.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, {} {} {} {}{}, {})",
            stringify!(Order),
            self.id,
            self.side,
            self.quantity.to_formatted_string(),
            self.symbol,
            self.order_type,
            self.price.map_or(String::new(), |price| format!(" @ {price}")),
            self.status,
        )
    }
}

/// Represents a bracket of linked orders: an entry with a stop-loss child and
/// an optional take-profit child which become live only once the entry fills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicOrder {
    /// The entry order.
    pub entry: Order,
    /// The stop-loss child order.
    pub stop_loss: Order,
    /// The optional take-profit child order.
    pub take_profit: Option<Order>,
}

impl AtomicOrder {
    /// Creates a new [`AtomicOrder`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the child orders are not for the entry symbol, or if a child
    /// shares the entry order id.
    #[must_use]
    pub fn new(entry: Order, stop_loss: Order, take_profit: Option<Order>) -> Self {
        check_predicate_true(
            stop_loss.symbol == entry.symbol
                && take_profit.as_ref().is_none_or(|tp| tp.symbol == entry.symbol),
            "atomic child orders must be for the entry symbol",
        )
        .expect(FAILED);
        check_predicate_true(
            stop_loss.id != entry.id
                && take_profit.as_ref().is_none_or(|tp| tp.id != entry.id && tp.id != stop_loss.id),
            "atomic order ids must be distinct",
        )
        .expect(FAILED);
        Self {
            entry,
            stop_loss,
            take_profit,
        }
    }
}

impl Display for AtomicOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(entry={}, stop_loss={}, take_profit={})",
            stringify!(AtomicOrder),
            self.entry.id,
            self.stop_loss.id,
            self.take_profit.as_ref().map_or("None".to_string(), |tp| tp.id.to_string()),
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

    fn market_order(id: &str) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("EURUSD"),
            OrderSide::Buy,
            OrderType::Market,
            Quantity::new(100_000.0, 0),
            None,
            TimeInForce::Day,
            None,
            None,
        )
    }

    fn stop_order(id: &str, side: OrderSide, price: Price) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("EURUSD"),
            side,
            OrderType::Stop,
            Quantity::new(100_000.0, 0),
            Some(price),
            TimeInForce::Gtc,
            None,
            None,
        )
    }

    #[rstest]
    fn test_new_market_order() {
        let order = market_order("O-1");
        assert_eq!(order.status, OrderStatus::Initialized);
        assert!(order.id_broker.is_none());
        assert!(!order.is_working());
        assert!(!order.is_completed());
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_market_order_with_price_panics() {
        let _ = Order::new(
            OrderId::new("O-1"),
            Symbol::new("EURUSD"),
            OrderSide::Buy,
            OrderType::Market,
            Quantity::new(100_000.0, 0),
            Some(Price::new(1.1, 1)),
            TimeInForce::Day,
            None,
            None,
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_limit_order_without_price_panics() {
        let _ = Order::new(
            OrderId::new("O-1"),
            Symbol::new("EURUSD"),
            OrderSide::Buy,
            OrderType::Limit,
            Quantity::new(100_000.0, 0),
            None,
            TimeInForce::Day,
            None,
            None,
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_gtd_without_expire_time_panics() {
        let _ = Order::new(
            OrderId::new("O-1"),
            Symbol::new("EURUSD"),
            OrderSide::Buy,
            OrderType::Limit,
            Quantity::new(100_000.0, 0),
            Some(Price::new(1.1, 1)),
            TimeInForce::Gtd,
            None,
            None,
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_zero_quantity_panics() {
        let _ = Order::new(
            OrderId::new("O-1"),
            Symbol::new("EURUSD"),
            OrderSide::Buy,
            OrderType::Market,
            Quantity::zero(0),
            None,
            TimeInForce::Day,
            None,
            None,
        );
    }

    #[rstest]
    fn test_atomic_order() {
        let atomic = AtomicOrder::new(
            market_order("O-1"),
            stop_order("O-2", OrderSide::Sell, Price::new(1.0980, 4)),
            Some(stop_order("O-3", OrderSide::Sell, Price::new(1.1050, 4))),
        );
        assert_eq!(atomic.entry.id, OrderId::new("O-1"));
        assert_eq!(
            atomic.to_string(),
            "AtomicOrder(entry=O-1, stop_loss=O-2, take_profit=O-3)",
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_atomic_order_duplicate_ids_panic() {
        let _ = AtomicOrder::new(
            market_order("O-1"),
            stop_order("O-1", OrderSide::Sell, Price::new(1.0980, 4)),
            None,
        );
    }

    #[rstest]
    fn test_display() {
        let order = stop_order("O-2", OrderSide::Buy, Price::new(1.1020, 4));
        assert_eq!(
            order.to_string(),
            "Order(id=O-2, BUY 100_000 EURUSD STOP @ 1.1020, INITIALIZED)",
        );
    }
}

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

//! The trading commands accepted by the simulated broker.

use fathom_model::{
    identifiers::{AccountId, OrderId, PositionId, StrategyId, TraderId},
    orders::{AtomicOrder, Order},
    types::{Price, Quantity},
};
use serde::{Deserialize, Serialize};

/// A command to report the current account state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInquiry {
    /// The trader ID issuing the inquiry.
    pub trader_id: TraderId,
    /// The account ID to report on.
    pub account_id: AccountId,
}

/// A command to submit a single order for execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrder {
    /// The trader ID issuing the command.
    pub trader_id: TraderId,
    /// The account ID to execute against.
    pub account_id: AccountId,
    /// The strategy ID the order belongs to.
    pub strategy_id: StrategyId,
    /// The position ID the order is entering or exiting.
    pub position_id: PositionId,
    /// The order to submit.
    pub order: Order,
}

/// A command to submit an atomic bracket of orders for execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAtomicOrder {
    /// The trader ID issuing the command.
    pub trader_id: TraderId,
    /// The account ID to execute against.
    pub account_id: AccountId,
    /// The strategy ID the bracket belongs to.
    pub strategy_id: StrategyId,
    /// The position ID the bracket is entering or exiting.
    pub position_id: PositionId,
    /// The bracket of orders to submit.
    pub atomic_order: AtomicOrder,
}

/// A command to modify the quantity and price of a working order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyOrder {
    /// The account ID the order was executed against.
    pub account_id: AccountId,
    /// The client order ID to modify.
    pub order_id: OrderId,
    /// The new order quantity.
    pub modified_quantity: Quantity,
    /// The new order price.
    pub modified_price: Price,
}

/// A command to cancel a working order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    /// The account ID the order was executed against.
    pub account_id: AccountId,
    /// The client order ID to cancel.
    pub order_id: OrderId,
}

/// A sum of the trading commands accepted by the simulated broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TradingCommand {
    /// Report the current account state.
    AccountInquiry(AccountInquiry),
    /// Submit a single order.
    SubmitOrder(SubmitOrder),
    /// Submit an atomic bracket of orders.
    SubmitAtomicOrder(SubmitAtomicOrder),
    /// Modify a working order.
    ModifyOrder(ModifyOrder),
    /// Cancel a working order.
    CancelOrder(CancelOrder),
}

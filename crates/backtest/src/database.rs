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

//! The execution database the simulator reads orders and positions from.

use std::{collections::HashMap, fmt::Debug};

use fathom_model::{
    identifiers::{OrderId, PositionId},
    orders::Order,
    position::Position,
};
use indexmap::IndexMap;

/// A directory of orders and positions keyed by id.
///
/// The database is maintained by the strategy framework driving the simulator;
/// the engine itself only ever reads from it. Open positions are returned in
/// insertion order so that dependent calculations iterate deterministically.
pub trait ExecutionDatabase: Debug {
    /// Returns the order with the given `order_id`, if found.
    fn order_for_id(&self, order_id: &OrderId) -> Option<Order>;

    /// Returns the position opened or closed by the order with the given
    /// `order_id`, if any.
    fn position_for_order(&self, order_id: &OrderId) -> Option<Position>;

    /// Returns all currently open positions keyed by position id.
    fn positions_open(&self) -> IndexMap<PositionId, Position>;
}

/// An in-memory [`ExecutionDatabase`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryExecutionDatabase {
    orders: HashMap<OrderId, Order>,
    positions: IndexMap<PositionId, Position>,
    index_order_position: HashMap<OrderId, PositionId>,
}

impl InMemoryExecutionDatabase {
    /// Creates a new empty [`InMemoryExecutionDatabase`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given `order` to the database.
    pub fn add_order(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// Adds the given `position` to the database.
    pub fn add_position(&mut self, position: Position) {
        self.positions.insert(position.id, position);
    }

    /// Indexes `order_id` against `position_id` so the position can be
    /// resolved from the order.
    pub fn index_order_position(&mut self, order_id: OrderId, position_id: PositionId) {
        self.index_order_position.insert(order_id, position_id);
    }

    /// Removes the position with the given `position_id`.
    pub fn remove_position(&mut self, position_id: &PositionId) -> Option<Position> {
        self.positions.shift_remove(position_id)
    }
}

impl ExecutionDatabase for InMemoryExecutionDatabase {
    fn order_for_id(&self, order_id: &OrderId) -> Option<Order> {
        self.orders.get(order_id).cloned()
    }

    fn position_for_order(&self, order_id: &OrderId) -> Option<Position> {
        self.index_order_position
            .get(order_id)
            .and_then(|position_id| self.positions.get(position_id))
            .copied()
    }

    fn positions_open(&self) -> IndexMap<PositionId, Position> {
        self.positions
            .iter()
            .filter(|(_, position)| !position.is_flat())
            .map(|(id, position)| (*id, *position))
            .collect()
    }
}

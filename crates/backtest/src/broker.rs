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

//! The simulated broker at the heart of the backtest.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;
use fathom_common::{clock::Clock, generators::GuidFactory, xrate::get_exchange_rate};
use fathom_core::{
    UnixNanos,
    correctness::{FAILED, check_equal, check_predicate_true},
};
use fathom_model::{
    data::QuoteTick,
    enums::{MarketPosition, OrderSide, OrderStatus, OrderType, PriceType},
    events::{
        AccountStateEvent, Event, OrderAccepted, OrderCancelRejected, OrderCanceled,
        OrderEventAny, OrderExpired, OrderFilled, OrderModified, OrderRejected, OrderSubmitted,
        OrderWorking,
    },
    identifiers::{
        AccountId, ExecutionId, OrderId, OrderIdBroker, PositionIdBroker, Symbol,
    },
    instruments::Instrument,
    orders::Order,
    position::Position,
    types::{Currency, Money, Price, Quantity},
};
use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use ustr::Ustr;

use crate::{
    config::SimulatedBrokerConfig,
    database::ExecutionDatabase,
    handler::EventSink,
    messages::{
        AccountInquiry, CancelOrder, ModifyOrder, SubmitAtomicOrder, SubmitOrder, TradingCommand,
    },
    models::{CommissionModel, FillModel, RolloverInterestCalculator},
};

/// A simulated broker for a single cash account.
///
/// The broker consumes quotes through [`Self::process_quote_tick`] and trading
/// commands through [`Self::process`], matching working orders against the
/// top of book and synchronously emitting broker-shaped execution events into
/// the registered event sink.
///
/// All operations are single-threaded and complete before returning; maps
/// scanned by the matching loop preserve insertion order so that identical
/// inputs replay to identical event streams.
pub struct SimulatedBroker {
    clock: Rc<RefCell<dyn Clock>>,
    guid_factory: Box<dyn GuidFactory>,
    database: Option<Rc<RefCell<dyn ExecutionDatabase>>>,
    sink: Rc<RefCell<dyn EventSink>>,
    fill_model: FillModel,
    commission_model: CommissionModel,
    rollover_calculator: Option<RolloverInterestCalculator>,
    account_id: AccountId,
    account_currency: Currency,
    frozen_account: bool,
    rollover_spread: f64,
    rollover_time_offset_mins: i64,
    instruments: HashMap<Symbol, Instrument>,
    market: HashMap<Symbol, QuoteTick>,
    slippages: HashMap<Symbol, Price>,
    min_stops: HashMap<Symbol, Price>,
    min_limits: HashMap<Symbol, Price>,
    working_orders: IndexMap<OrderId, Order>,
    atomic_child_orders: IndexMap<OrderId, Vec<Order>>,
    oco_orders: HashMap<OrderId, OrderId>,
    starting_capital: Money,
    account_capital: Money,
    cash_start_day: Money,
    cash_activity_day: Money,
    total_commissions: Money,
    total_rollover_interest: Money,
    current_day: Option<NaiveDate>,
    rollover_time: Option<UnixNanos>,
    rollover_applied: bool,
}

impl std::fmt::Debug for SimulatedBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(SimulatedBroker))
            .field("account_id", &self.account_id)
            .field("account_capital", &self.account_capital)
            .field("working_orders", &self.working_orders.len())
            .finish_non_exhaustive()
    }
}

impl SimulatedBroker {
    /// Creates a new [`SimulatedBroker`] instance.
    ///
    /// Loads the rollover interest rate table when the config names one; the
    /// rollover engine is otherwise disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the starting capital currency differs from the
    /// account currency, if the commission rate is invalid, or if the rate
    /// table cannot be loaded.
    pub fn new(
        config: SimulatedBrokerConfig,
        clock: Rc<RefCell<dyn Clock>>,
        guid_factory: Box<dyn GuidFactory>,
        database: Option<Rc<RefCell<dyn ExecutionDatabase>>>,
        sink: Rc<RefCell<dyn EventSink>>,
        fill_model: FillModel,
    ) -> anyhow::Result<Self> {
        check_equal(
            config.starting_capital.currency,
            config.account_currency,
            "starting capital currency",
            "account currency",
        )?;
        let commission_model = CommissionModel::new(config.commission_rate_bp)?;
        let rollover_calculator = match &config.short_term_interest_csv_path {
            Some(path) => Some(RolloverInterestCalculator::from_csv_path(path)?),
            None => None,
        };

        Ok(Self {
            clock,
            guid_factory,
            database,
            sink,
            fill_model,
            commission_model,
            rollover_calculator,
            account_id: config.account_id,
            account_currency: config.account_currency,
            frozen_account: config.frozen_account,
            rollover_spread: config.rollover_spread,
            rollover_time_offset_mins: config.rollover_time_offset_mins,
            instruments: HashMap::new(),
            market: HashMap::new(),
            slippages: HashMap::new(),
            min_stops: HashMap::new(),
            min_limits: HashMap::new(),
            working_orders: IndexMap::new(),
            atomic_child_orders: IndexMap::new(),
            oco_orders: HashMap::new(),
            starting_capital: config.starting_capital,
            account_capital: config.starting_capital,
            cash_start_day: config.starting_capital,
            cash_activity_day: Money::zero(config.account_currency),
            total_commissions: Money::zero(config.account_currency),
            total_rollover_interest: Money::zero(config.account_currency),
            current_day: None,
            rollover_time: None,
            rollover_applied: false,
        })
    }

    /// Registers the given `instrument` for trading, caching its slippage and
    /// minimum price distances.
    pub fn register_instrument(&mut self, instrument: Instrument) {
        let tick_size = instrument.tick_size;
        self.slippages.insert(instrument.symbol, tick_size);
        self.min_stops.insert(
            instrument.symbol,
            Price::from_raw(
                tick_size.raw * i64::from(instrument.min_stop_distance),
                tick_size.precision,
            ),
        );
        self.min_limits.insert(
            instrument.symbol,
            Price::from_raw(
                tick_size.raw * i64::from(instrument.min_limit_distance),
                tick_size.precision,
            ),
        );
        self.instruments.insert(instrument.symbol, instrument);

        log::info!("Registered instrument {}", instrument.symbol);
    }

    /// Sets the fill model.
    pub fn set_fill_model(&mut self, fill_model: FillModel) {
        self.fill_model = fill_model;
    }

    /// Sets the rollover interest rate table.
    pub fn set_rollover_calculator(&mut self, calculator: RolloverInterestCalculator) {
        self.rollover_calculator = Some(calculator);
    }

    /// Returns the account capital at the start of the backtest.
    #[must_use]
    pub const fn starting_capital(&self) -> Money {
        self.starting_capital
    }

    /// Returns the current account capital.
    #[must_use]
    pub const fn account_capital(&self) -> Money {
        self.account_capital
    }

    /// Returns the account cash balance at the start of the current trading day.
    #[must_use]
    pub const fn cash_start_day(&self) -> Money {
        self.cash_start_day
    }

    /// Returns the account cash movement for the current trading day.
    #[must_use]
    pub const fn cash_activity_day(&self) -> Money {
        self.cash_activity_day
    }

    /// Returns the accumulated commissions (accumulates negatively).
    #[must_use]
    pub const fn total_commissions(&self) -> Money {
        self.total_commissions
    }

    /// Returns the accumulated rollover interest.
    #[must_use]
    pub const fn total_rollover_interest(&self) -> Money {
        self.total_rollover_interest
    }

    /// Returns the working orders keyed by order id, in insertion order.
    #[must_use]
    pub const fn working_orders(&self) -> &IndexMap<OrderId, Order> {
        &self.working_orders
    }

    /// Returns the pending atomic child orders keyed by entry order id.
    #[must_use]
    pub const fn atomic_child_orders(&self) -> &IndexMap<OrderId, Vec<Order>> {
        &self.atomic_child_orders
    }

    /// Returns the one-cancels-other pairings (symmetric).
    #[must_use]
    pub const fn oco_orders(&self) -> &HashMap<OrderId, OrderId> {
        &self.oco_orders
    }

    // -- TICK PROCESSING -------------------------------------------------------------------------

    /// Processes the given quote: advances the virtual clock, updates the
    /// market snapshot, performs day rollover bookkeeping, applies overnight
    /// rollover interest when due, and re-evaluates the working orders for
    /// the quoted symbol.
    pub fn process_quote_tick(&mut self, tick: &QuoteTick) {
        log::debug!("Processing {tick}");

        self.clock.borrow_mut().set_time(tick.ts_event);
        self.market.insert(tick.symbol, *tick);

        let today = tick.ts_event.to_datetime_utc().date_naive();
        if self.current_day != Some(today) {
            self.current_day = Some(today);
            self.cash_start_day = self.account_capital;
            self.cash_activity_day = Money::zero(self.account_currency);
            self.rollover_applied = false;
            self.rollover_time = Some(self.calculate_rollover_time(today));
        }

        if !self.rollover_applied
            && self.rollover_time.is_some_and(|rollover_time| tick.ts_event >= rollover_time)
        {
            self.apply_rollover_interest(tick.ts_event);
            self.rollover_applied = true;
        }

        // Snapshot the scan order; fills and OCO cascades mutate the map
        let order_ids: Vec<OrderId> = self.working_orders.keys().copied().collect();
        for order_id in order_ids {
            let Some(order) = self.working_orders.get(&order_id) else {
                continue; // Removed by a cascade earlier in this scan
            };
            if order.symbol != tick.symbol || !order.is_working() {
                continue;
            }

            let side = order.side;
            let stop_kind = order.order_type.is_stop_kind();
            let order_price = order.price.expect(FAILED);
            let expire_time = order.expire_time;

            let triggered = match (side, stop_kind) {
                (OrderSide::Buy, true) => {
                    tick.ask >= order_price
                        || (tick.ask == order_price && self.fill_model.is_stop_filled())
                }
                (OrderSide::Buy, false) => {
                    tick.ask <= order_price
                        || (tick.ask == order_price && self.fill_model.is_limit_filled())
                }
                (OrderSide::Sell, true) => {
                    tick.bid <= order_price
                        || (tick.bid == order_price && self.fill_model.is_stop_filled())
                }
                (OrderSide::Sell, false) => {
                    tick.bid >= order_price
                        || (tick.bid == order_price && self.fill_model.is_limit_filled())
                }
            };

            if triggered {
                let order = self.working_orders.shift_remove(&order_id).expect(FAILED);
                let fill_price = self.fill_price_with_slippage(tick.symbol, side, order_price);
                self.fill_order(order, fill_price);
            } else if expire_time.is_some_and(|expire_time| tick.ts_event >= expire_time) {
                let order = self.working_orders.shift_remove(&order_id).expect(FAILED);
                self.expire_order(order);
            }
        }
    }

    // -- COMMAND HANDLERS ------------------------------------------------------------------------

    /// Dispatches the given trading command to its handler.
    pub fn process(&mut self, command: TradingCommand) {
        match command {
            TradingCommand::AccountInquiry(command) => self.account_inquiry(&command),
            TradingCommand::SubmitOrder(command) => self.submit_order(command),
            TradingCommand::SubmitAtomicOrder(command) => self.submit_atomic_order(command),
            TradingCommand::ModifyOrder(command) => self.modify_order(&command),
            TradingCommand::CancelOrder(command) => self.cancel_order(&command),
        }
    }

    /// Emits an account state event reflecting the current account snapshot.
    pub fn account_inquiry(&mut self, command: &AccountInquiry) {
        log::debug!("Processing account inquiry from trader {}", command.trader_id);
        self.generate_account_state();
    }

    /// Submits the given order for execution.
    pub fn submit_order(&mut self, command: SubmitOrder) {
        let mut order = command.order;
        order.status = OrderStatus::Submitted;
        self.generate_order_submitted(&order);
        self.process_order(order);
    }

    /// Submits the given atomic bracket: the entry is processed as a
    /// standalone order, the children are parked until the entry fills.
    pub fn submit_atomic_order(&mut self, command: SubmitAtomicOrder) {
        let atomic = command.atomic_order;

        let mut child_orders = vec![atomic.stop_loss.clone()];
        if let Some(take_profit) = &atomic.take_profit {
            child_orders.push(take_profit.clone());
            self.oco_orders.insert(atomic.stop_loss.id, take_profit.id);
            self.oco_orders.insert(take_profit.id, atomic.stop_loss.id);
        }
        self.atomic_child_orders.insert(atomic.entry.id, child_orders);

        self.submit_order(SubmitOrder {
            trader_id: command.trader_id,
            account_id: command.account_id,
            strategy_id: command.strategy_id,
            position_id: command.position_id,
            order: atomic.entry,
        });
    }

    /// Cancels the working order named by the command.
    pub fn cancel_order(&mut self, command: &CancelOrder) {
        match self.working_orders.shift_remove(&command.order_id) {
            Some(mut order) => {
                order.status = OrderStatus::Canceled;
                self.generate_order_canceled(order.id, order.symbol);
                self.check_oco(order.id);
            }
            None => self.generate_order_cancel_rejected(
                command.order_id,
                "cancel order",
                "order not found",
            ),
        }
    }

    /// Modifies the working order named by the command, re-validating the
    /// modified price against the latest market.
    pub fn modify_order(&mut self, command: &ModifyOrder) {
        let Some(order) = self.working_orders.get(&command.order_id) else {
            self.generate_order_cancel_rejected(
                command.order_id,
                "modify order",
                "order not found",
            );
            return;
        };
        let symbol = order.symbol;
        let side = order.side;
        let order_type = order.order_type;
        let order_id_broker = order.id_broker.expect(FAILED);

        if command.modified_quantity.is_zero() {
            self.generate_order_cancel_rejected(
                command.order_id,
                "modify order",
                "modified quantity was zero",
            );
            return;
        }

        let tick = *self.market.get(&symbol).expect(FAILED);
        if let Some(reason) =
            self.invalid_price_reason(symbol, side, order_type, Some(command.modified_price), &tick)
        {
            let order = self.working_orders.get(&command.order_id).cloned().expect(FAILED);
            self.reject_order(order, &reason);
            return;
        }

        // The stored order keeps its original price and quantity; subsequent
        // fills evaluate against them.
        self.generate_order_modified(
            command.order_id,
            order_id_broker,
            command.modified_quantity,
            command.modified_price,
        );
    }

    // -- ORDER PROCESSING ------------------------------------------------------------------------

    fn process_order(&mut self, mut order: Order) {
        check_predicate_true(
            !self.working_orders.contains_key(&order.id),
            &format!("order id {} was already working", order.id),
        )
        .expect(FAILED);

        let instrument = *self
            .instruments
            .get(&order.symbol)
            .unwrap_or_else(|| panic!("no instrument registered for {}", order.symbol));

        if order.quantity > instrument.max_trade_size {
            let reason = format!(
                "order quantity of {} exceeds the maximum trade size of {}",
                order.quantity.to_formatted_string(),
                instrument.max_trade_size.to_formatted_string(),
            );
            self.reject_order(order, &reason);
            return;
        }
        if order.quantity < instrument.min_trade_size {
            let reason = format!(
                "order quantity of {} is less than the minimum trade size of {}",
                order.quantity.to_formatted_string(),
                instrument.min_trade_size.to_formatted_string(),
            );
            self.reject_order(order, &reason);
            return;
        }

        let Some(tick) = self.market.get(&order.symbol).copied() else {
            let reason = format!("no market for {}", order.symbol);
            self.reject_order(order, &reason);
            return;
        };

        if let Some(reason) =
            self.invalid_price_reason(order.symbol, order.side, order.order_type, order.price, &tick)
        {
            self.reject_order(order, &reason);
            return;
        }

        if order.order_type == OrderType::Market {
            self.accept_order(&mut order);
            let market_price = match order.side {
                OrderSide::Buy => tick.ask,
                OrderSide::Sell => tick.bid,
            };
            let fill_price = self.fill_price_with_slippage(order.symbol, order.side, market_price);
            self.fill_order(order, fill_price);
            return;
        }

        self.accept_order(&mut order);
        order.status = OrderStatus::Working;
        self.generate_order_working(&order);
        self.working_orders.insert(order.id, order);
    }

    fn accept_order(&mut self, order: &mut Order) {
        order.id_broker = Some(OrderIdBroker::new(format!("B{}", order.id)));
        order.status = OrderStatus::Accepted;
        self.generate_order_accepted(order);
    }

    fn fill_order(&mut self, mut order: Order, fill_price: Price) {
        let quote_currency = self
            .instruments
            .get(&order.symbol)
            .map(|instrument| instrument.quote_currency)
            .expect(FAILED);

        // A fill against a position of opposite entry direction closes it;
        // the account adjustment is emitted ahead of the fill event
        if let Some(database) = self.database.clone() {
            let position = database.borrow().position_for_order(&order.id);
            if let Some(position) = position {
                if position.entry_direction != order.side {
                    self.adjust_account(&order, fill_price, quote_currency, &position);
                }
            }
        }

        order.status = OrderStatus::Filled;
        self.generate_order_filled(&order, fill_price, quote_currency);
        self.check_oco(order.id);

        if self.atomic_child_orders.contains_key(&order.id) {
            let child_ids: Vec<OrderId> = self
                .atomic_child_orders
                .get(&order.id)
                .expect(FAILED)
                .iter()
                .map(|child| child.id)
                .collect();
            for child_id in child_ids {
                // Re-read the stored child: a sibling's cascade may have
                // rejected it within this release
                let child = self
                    .atomic_child_orders
                    .get(&order.id)
                    .and_then(|child_orders| {
                        child_orders.iter().find(|child| child.id == child_id)
                    })
                    .cloned()
                    .expect(FAILED);
                if !child.is_completed() {
                    self.process_order(child);
                }
            }
            self.atomic_child_orders.shift_remove(&order.id);
        }
    }

    fn reject_order(&mut self, mut order: Order, reason: &str) {
        order.status = OrderStatus::Rejected;
        self.working_orders.shift_remove(&order.id);
        self.generate_order_rejected(order.id, order.symbol, reason);
        self.check_oco(order.id);
        self.clean_up_child_orders(order.id);
    }

    fn expire_order(&mut self, mut order: Order) {
        order.status = OrderStatus::Expired;
        self.generate_order_expired(order.id, order.symbol);
        self.check_oco(order.id);
        self.clean_up_child_orders(order.id);
    }

    fn fill_price_with_slippage(&mut self, symbol: Symbol, side: OrderSide, price: Price) -> Price {
        if !self.fill_model.is_slipped() {
            return price;
        }
        let slippage = *self.slippages.get(&symbol).expect(FAILED);
        match side {
            OrderSide::Buy => price + slippage,
            OrderSide::Sell => price - slippage,
        }
    }

    fn invalid_price_reason(
        &self,
        symbol: Symbol,
        side: OrderSide,
        order_type: OrderType,
        price: Option<Price>,
        tick: &QuoteTick,
    ) -> Option<String> {
        let price = price?;
        let min_stop = *self.min_stops.get(&symbol).expect(FAILED);
        let min_limit = *self.min_limits.get(&symbol).expect(FAILED);

        match (side, order_type.is_stop_kind()) {
            (OrderSide::Buy, true) if price < tick.ask + min_stop => Some(format!(
                "BUY {order_type} order price of {price} is too close to the market (ask price was {})",
                tick.ask,
            )),
            (OrderSide::Buy, false) if price > tick.bid - min_limit => Some(format!(
                "BUY {order_type} order price of {price} is too close to the market (bid price was {})",
                tick.bid,
            )),
            (OrderSide::Sell, true) if price > tick.bid - min_stop => Some(format!(
                "SELL {order_type} order price of {price} is too close to the market (bid price was {})",
                tick.bid,
            )),
            (OrderSide::Sell, false) if price < tick.ask + min_limit => Some(format!(
                "SELL {order_type} order price of {price} is too close to the market (ask price was {})",
                tick.ask,
            )),
            _ => None,
        }
    }

    // -- LINKAGE MANAGEMENT ----------------------------------------------------------------------

    fn check_oco(&mut self, order_id: OrderId) {
        let Some(partner_id) = self.oco_orders.remove(&order_id) else {
            return;
        };
        self.oco_orders.remove(&partner_id);

        // The partner may still be a pending atomic child which never worked
        let mut partner_symbol: Option<Symbol> = None;
        for child_orders in self.atomic_child_orders.values_mut() {
            for child in child_orders.iter_mut() {
                if child.id == partner_id && !child.is_completed() {
                    child.status = OrderStatus::Rejected;
                    partner_symbol = Some(child.symbol);
                }
            }
        }
        if let Some(symbol) = partner_symbol {
            let reason = format!("OCO order rejected from {order_id}");
            self.generate_order_rejected(partner_id, symbol, &reason);
        }

        if let Some(mut partner) = self.working_orders.shift_remove(&partner_id) {
            partner.status = OrderStatus::Canceled;
            self.generate_order_canceled(partner.id, partner.symbol);
        }
    }

    fn clean_up_child_orders(&mut self, order_id: OrderId) {
        if let Some(child_orders) = self.atomic_child_orders.shift_remove(&order_id) {
            // Children which never became working take their OCO pairing with them
            for child in &child_orders {
                if let Some(partner_id) = self.oco_orders.remove(&child.id) {
                    self.oco_orders.remove(&partner_id);
                }
            }
        }
    }

    // -- ACCOUNT ---------------------------------------------------------------------------------

    fn adjust_account(
        &mut self,
        order: &Order,
        fill_price: Price,
        quote_currency: Currency,
        position: &Position,
    ) {
        let price_type = match order.side {
            OrderSide::Sell => PriceType::Bid,
            OrderSide::Buy => PriceType::Ask,
        };
        let (quotes_bid, quotes_ask) = self.build_rate_quotes();
        let exchange_rate = get_exchange_rate(
            quote_currency,
            self.account_currency,
            price_type,
            &quotes_bid,
            &quotes_ask,
        )
        .to_f64()
        .expect(FAILED);

        let pnl = self.calculate_pnl(
            position.market_position,
            position.average_open_price,
            fill_price,
            order.quantity,
            exchange_rate,
        );
        let commission = self.commission_model.calculate(
            order.symbol,
            order.quantity,
            fill_price,
            exchange_rate,
            self.account_currency,
        );
        self.total_commissions -= commission;
        let net_pnl = pnl - commission;

        if !self.frozen_account {
            self.account_capital += net_pnl;
            self.cash_activity_day += net_pnl;
            self.generate_account_state();
        }
    }

    fn calculate_pnl(
        &self,
        market_position: MarketPosition,
        open_price: Price,
        close_price: Price,
        quantity: Quantity,
        exchange_rate: f64,
    ) -> Money {
        let points = match market_position {
            MarketPosition::Long => close_price.as_f64() - open_price.as_f64(),
            MarketPosition::Short => open_price.as_f64() - close_price.as_f64(),
            MarketPosition::Flat => panic!("cannot calculate PnL for a FLAT position"),
        };
        Money::new(points * quantity.as_f64() * exchange_rate, self.account_currency)
    }

    fn build_rate_quotes(&self) -> (HashMap<Symbol, Decimal>, HashMap<Symbol, Decimal>) {
        let mut quotes_bid = HashMap::new();
        let mut quotes_ask = HashMap::new();
        for (symbol, tick) in &self.market {
            if self.instruments.get(symbol).is_some_and(|instrument| instrument.is_forex()) {
                quotes_bid.insert(*symbol, tick.bid.as_decimal());
                quotes_ask.insert(*symbol, tick.ask.as_decimal());
            }
        }
        (quotes_bid, quotes_ask)
    }

    // -- ROLLOVER --------------------------------------------------------------------------------

    fn calculate_rollover_time(&self, date: NaiveDate) -> UnixNanos {
        let new_york_close = New_York
            .with_ymd_and_hms(date.year(), date.month(), date.day(), 17, 0, 0)
            .single()
            .expect("17:00 New York must be unambiguous");
        let utc = new_york_close.with_timezone(&Utc)
            - TimeDelta::minutes(self.rollover_time_offset_mins);
        UnixNanos::from_datetime_utc(utc)
    }

    fn apply_rollover_interest(&mut self, ts_event: UnixNanos) {
        let Some(database) = self.database.clone() else {
            log::warn!("Cannot apply rollover interest (no execution database registered)");
            return;
        };
        if self.rollover_calculator.is_none() {
            log::warn!("Cannot apply rollover interest (no rollover rate table loaded)");
            return;
        }

        let date = ts_event.to_datetime_utc().date_naive();
        let open_positions = database.borrow().positions_open();
        let (quotes_bid, quotes_ask) = self.build_rate_quotes();

        let mut cumulative = 0.0_f64;
        let mut applied_any = false;

        for position in open_positions.values() {
            let Some(instrument) = self.instruments.get(&position.symbol) else {
                log::error!(
                    "Cannot apply rollover interest (no instrument registered for {})",
                    position.symbol,
                );
                continue;
            };
            if !instrument.is_forex() {
                continue;
            }
            let Some(tick) = self.market.get(&position.symbol) else {
                log::warn!(
                    "Cannot apply rollover interest (no market for {})",
                    position.symbol,
                );
                continue;
            };

            let calculator = self.rollover_calculator.as_ref().expect(FAILED);
            let overnight_rate = match calculator.overnight_rate(position.symbol, date) {
                Ok(rate) => rate,
                Err(e) => {
                    log::error!("Cannot apply rollover interest: {e}");
                    continue;
                }
            };
            let exchange_rate = get_exchange_rate(
                instrument.quote_currency,
                self.account_currency,
                PriceType::Mid,
                &quotes_bid,
                &quotes_ask,
            )
            .to_f64()
            .expect(FAILED);

            let mid = (tick.bid.as_f64() + tick.ask.as_f64()) / 2.0;
            let mut rollover =
                mid * position.quantity.as_f64() * overnight_rate * exchange_rate;
            rollover -= rollover * self.rollover_spread;
            cumulative += rollover;
            applied_any = true;
        }

        if !applied_any {
            return;
        }

        // Triple charge covers the weekend settlement days
        if matches!(date.weekday(), Weekday::Wed | Weekday::Fri) {
            cumulative *= 3.0;
        }

        let amount = Money::new(cumulative, self.account_currency);
        self.total_rollover_interest += amount;

        if !self.frozen_account {
            self.account_capital += amount;
            self.cash_activity_day += amount;
            self.generate_account_state();
        }
    }

    // -- EVENT GENERATION ------------------------------------------------------------------------

    fn send(&mut self, event: Event) {
        self.sink.borrow_mut().handle_event(event);
    }

    fn ts_now(&self) -> UnixNanos {
        self.clock.borrow().timestamp_ns()
    }

    fn generate_account_state(&mut self) {
        let event = AccountStateEvent::new(
            self.account_id,
            self.account_currency,
            self.account_capital,
            self.cash_start_day,
            self.cash_activity_day,
            self.guid_factory.generate(),
            self.ts_now(),
        );
        self.send(Event::Account(event));
    }

    fn generate_order_submitted(&mut self, order: &Order) {
        let event = OrderSubmitted {
            order_id: order.id,
            symbol: order.symbol,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Submitted(event)));
    }

    fn generate_order_accepted(&mut self, order: &Order) {
        let event = OrderAccepted {
            order_id: order.id,
            order_id_broker: order.id_broker.expect(FAILED),
            symbol: order.symbol,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Accepted(event)));
    }

    fn generate_order_rejected(&mut self, order_id: OrderId, symbol: Symbol, reason: &str) {
        let event = OrderRejected {
            order_id,
            symbol,
            reason: Ustr::from(reason),
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Rejected(event)));
    }

    fn generate_order_working(&mut self, order: &Order) {
        let event = OrderWorking {
            order_id: order.id,
            order_id_broker: order.id_broker.expect(FAILED),
            symbol: order.symbol,
            label: order.label,
            side: order.side,
            order_type: order.order_type,
            quantity: order.quantity,
            price: order.price.expect(FAILED),
            time_in_force: order.time_in_force,
            expire_time: order.expire_time,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Working(event)));
    }

    fn generate_order_modified(
        &mut self,
        order_id: OrderId,
        order_id_broker: OrderIdBroker,
        modified_quantity: Quantity,
        modified_price: Price,
    ) {
        let event = OrderModified {
            order_id,
            order_id_broker,
            modified_quantity,
            modified_price,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Modified(event)));
    }

    fn generate_order_canceled(&mut self, order_id: OrderId, symbol: Symbol) {
        let event = OrderCanceled {
            order_id,
            symbol,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Canceled(event)));
    }

    fn generate_order_expired(&mut self, order_id: OrderId, symbol: Symbol) {
        let event = OrderExpired {
            order_id,
            symbol,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Expired(event)));
    }

    fn generate_order_filled(&mut self, order: &Order, fill_price: Price, quote_currency: Currency) {
        let event = OrderFilled {
            order_id: order.id,
            execution_id: ExecutionId::new(format!("E-{}", order.id)),
            position_id_broker: PositionIdBroker::new(format!("ET-{}", order.id)),
            symbol: order.symbol,
            side: order.side,
            filled_quantity: order.quantity,
            average_price: fill_price,
            quote_currency,
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::Filled(event)));
    }

    fn generate_order_cancel_rejected(
        &mut self,
        order_id: OrderId,
        rejected_response_to: &str,
        reason: &str,
    ) {
        let event = OrderCancelRejected {
            order_id,
            rejected_response_to: Ustr::from(rejected_response_to),
            reason: Ustr::from(reason),
            event_id: self.guid_factory.generate(),
            ts_event: self.ts_now(),
        };
        self.send(Event::Order(OrderEventAny::CancelRejected(event)));
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fathom_common::{clock::TestClock, generators::DeterministicGuidFactory};
    use fathom_model::{
        enums::{SecurityType, TimeInForce},
        identifiers::{PositionId, StrategyId, TraderId},
        orders::AtomicOrder,
    };
    use rstest::rstest;

    use super::*;
    use crate::{database::InMemoryExecutionDatabase, handler::RecordingEventSink};

    const SEC_NANOS: u64 = 1_000_000_000;

    fn eurusd(min_stop_distance: u32, min_limit_distance: u32) -> Instrument {
        Instrument::new(
            Symbol::new("EURUSD"),
            Currency::USD(),
            SecurityType::Forex,
            Price::new(0.0001, 4),
            4,
            Quantity::new(1_000.0, 0),
            Quantity::new(50_000_000.0, 0),
            min_stop_distance,
            min_limit_distance,
        )
    }

    struct TestVenue {
        broker: SimulatedBroker,
        sink: Rc<RefCell<RecordingEventSink>>,
        database: Rc<RefCell<InMemoryExecutionDatabase>>,
    }

    fn venue_with(
        config: SimulatedBrokerConfig,
        fill_model: FillModel,
        instrument: Instrument,
    ) -> TestVenue {
        let sink = Rc::new(RefCell::new(RecordingEventSink::new()));
        let database = Rc::new(RefCell::new(InMemoryExecutionDatabase::new()));
        let clock = Rc::new(RefCell::new(TestClock::new()));

        let clock_handle: Rc<RefCell<dyn Clock>> = clock;
        let database_handle: Rc<RefCell<dyn ExecutionDatabase>> = database.clone();
        let sink_handle: Rc<RefCell<dyn EventSink>> = sink.clone();

        let mut broker = SimulatedBroker::new(
            config,
            clock_handle,
            Box::new(DeterministicGuidFactory::new()),
            Some(database_handle),
            sink_handle,
            fill_model,
        )
        .unwrap();
        broker.register_instrument(instrument);

        TestVenue {
            broker,
            sink,
            database,
        }
    }

    fn venue() -> TestVenue {
        venue_with(SimulatedBrokerConfig::default(), FillModel::default(), eurusd(0, 0))
    }

    fn quote(bid: f64, ask: f64, ts_secs: u64) -> QuoteTick {
        QuoteTick::new(
            Symbol::new("EURUSD"),
            Price::new(bid, 4),
            Price::new(ask, 4),
            UnixNanos::new(ts_secs * SEC_NANOS),
        )
    }

    fn quote_at(bid: f64, ask: f64, ts_event: UnixNanos) -> QuoteTick {
        QuoteTick::new(Symbol::new("EURUSD"), Price::new(bid, 4), Price::new(ask, 4), ts_event)
    }

    fn market_order(id: &str, side: OrderSide, quantity: f64) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("EURUSD"),
            side,
            OrderType::Market,
            Quantity::new(quantity, 0),
            None,
            TimeInForce::Day,
            None,
            None,
        )
    }

    fn priced_order(id: &str, side: OrderSide, order_type: OrderType, price: f64) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("EURUSD"),
            side,
            order_type,
            Quantity::new(100_000.0, 0),
            Some(Price::new(price, 4)),
            TimeInForce::Gtc,
            None,
            None,
        )
    }

    fn gtd_order(
        id: &str,
        side: OrderSide,
        order_type: OrderType,
        price: f64,
        expire_time: UnixNanos,
    ) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("EURUSD"),
            side,
            order_type,
            Quantity::new(100_000.0, 0),
            Some(Price::new(price, 4)),
            TimeInForce::Gtd,
            Some(expire_time),
            None,
        )
    }

    fn submit(order: Order) -> TradingCommand {
        TradingCommand::SubmitOrder(SubmitOrder {
            trader_id: TraderId::new("TESTER-001"),
            account_id: AccountId::new("SIM-001"),
            strategy_id: StrategyId::new("S-001"),
            position_id: PositionId::new(&format!("P-{}", order.id)),
            order,
        })
    }

    fn submit_atomic(entry: Order, stop_loss: Order, take_profit: Option<Order>) -> TradingCommand {
        TradingCommand::SubmitAtomicOrder(SubmitAtomicOrder {
            trader_id: TraderId::new("TESTER-001"),
            account_id: AccountId::new("SIM-001"),
            strategy_id: StrategyId::new("S-001"),
            position_id: PositionId::new(&format!("P-{}", entry.id)),
            atomic_order: AtomicOrder::new(entry, stop_loss, take_profit),
        })
    }

    fn event_types(sink: &RecordingEventSink) -> Vec<&'static str> {
        sink.events
            .iter()
            .map(|event| match event {
                Event::Account(_) => "AccountState",
                Event::Order(order_event) => match order_event {
                    OrderEventAny::Submitted(_) => "OrderSubmitted",
                    OrderEventAny::Accepted(_) => "OrderAccepted",
                    OrderEventAny::Rejected(_) => "OrderRejected",
                    OrderEventAny::Working(_) => "OrderWorking",
                    OrderEventAny::Modified(_) => "OrderModified",
                    OrderEventAny::Canceled(_) => "OrderCanceled",
                    OrderEventAny::Expired(_) => "OrderExpired",
                    OrderEventAny::Filled(_) => "OrderFilled",
                    OrderEventAny::CancelRejected(_) => "OrderCancelRejected",
                },
            })
            .collect()
    }

    fn last_fill(sink: &RecordingEventSink) -> OrderFilled {
        sink.events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Order(OrderEventAny::Filled(fill)) => Some(fill.clone()),
                _ => None,
            })
            .expect("no fill event recorded")
    }

    fn last_rejected(sink: &RecordingEventSink) -> OrderRejected {
        sink.events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Order(OrderEventAny::Rejected(rejected)) => Some(rejected.clone()),
                _ => None,
            })
            .expect("no rejected event recorded")
    }

    fn last_account_state(sink: &RecordingEventSink) -> AccountStateEvent {
        sink.events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Account(state) => Some(state.clone()),
                _ => None,
            })
            .expect("no account state event recorded")
    }

    fn usd(amount: f64) -> Money {
        Money::new(amount, Currency::USD())
    }

    #[rstest]
    fn test_market_buy_fills_at_ask_without_slippage() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(market_order("O-1", OrderSide::Buy, 100_000.0)));

        assert_eq!(
            event_types(&venue.sink.borrow()),
            ["OrderSubmitted", "OrderAccepted", "OrderFilled"],
        );
        let fill = last_fill(&venue.sink.borrow());
        assert_eq!(fill.average_price, Price::new(1.1002, 4));
        assert_eq!(fill.execution_id, ExecutionId::new("E-O-1"));
        assert_eq!(fill.position_id_broker, PositionIdBroker::new("ET-O-1"));
        assert_eq!(fill.quote_currency, Currency::USD());
        assert!(venue.broker.working_orders().is_empty());
    }

    #[rstest]
    fn test_market_sell_fills_at_bid() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(market_order("O-1", OrderSide::Sell, 100_000.0)));

        assert_eq!(last_fill(&venue.sink.borrow()).average_price, Price::new(1.1000, 4));
    }

    #[rstest]
    fn test_buy_stop_triggers_when_ask_rests_on_price() {
        // The marginal fill oracle says no, yet the inclusive trigger fills
        let fill_model = FillModel::new(0.0, 0.0, 0.0, None).unwrap();
        let mut venue = venue_with(SimulatedBrokerConfig::default(), fill_model, eurusd(0, 0));

        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));
        assert_eq!(venue.broker.working_orders().len(), 1);

        venue.broker.process_quote_tick(&quote(1.1018, 1.1020, 2));

        let fill = last_fill(&venue.sink.borrow());
        assert_eq!(fill.average_price, Price::new(1.1020, 4));
        assert!(venue.broker.working_orders().is_empty());
    }

    #[rstest]
    fn test_sell_limit_fills_with_slippage() {
        let fill_model = FillModel::new(0.0, 0.0, 1.0, None).unwrap();
        let mut venue = venue_with(SimulatedBrokerConfig::default(), fill_model, eurusd(0, 0));

        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Sell, OrderType::Limit, 1.1030)));
        venue.broker.process_quote_tick(&quote(1.1031, 1.1033, 2));

        assert_eq!(last_fill(&venue.sink.borrow()).average_price, Price::new(1.1029, 4));
    }

    #[rstest]
    fn test_atomic_fill_releases_children_then_oco_cascades() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit_atomic(
            market_order("O-1", OrderSide::Buy, 100_000.0),
            priced_order("O-2", OrderSide::Sell, OrderType::Stop, 1.0980),
            Some(priced_order("O-3", OrderSide::Sell, OrderType::Limit, 1.1050)),
        ));

        // Entry filled immediately; both children released to the working set
        assert_eq!(
            event_types(&venue.sink.borrow()),
            [
                "OrderSubmitted",
                "OrderAccepted",
                "OrderFilled",
                "OrderAccepted",
                "OrderWorking",
                "OrderAccepted",
                "OrderWorking",
            ],
        );
        assert_eq!(venue.broker.working_orders().len(), 2);
        assert!(venue.broker.atomic_child_orders().is_empty());
        assert_eq!(
            venue.broker.oco_orders().get(&OrderId::new("O-2")),
            Some(&OrderId::new("O-3")),
        );
        assert_eq!(
            venue.broker.oco_orders().get(&OrderId::new("O-3")),
            Some(&OrderId::new("O-2")),
        );

        // Stop-loss fills; the take-profit is canceled through the OCO pair
        venue.broker.process_quote_tick(&quote(1.0980, 1.0982, 2));

        let types = event_types(&venue.sink.borrow());
        assert_eq!(&types[types.len() - 2..], ["OrderFilled", "OrderCanceled"]);
        assert_eq!(last_fill(&venue.sink.borrow()).order_id, OrderId::new("O-2"));
        assert!(venue.broker.working_orders().is_empty());
        assert!(venue.broker.oco_orders().is_empty());
    }

    #[rstest]
    fn test_limit_order_expires_when_expire_time_reached() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(gtd_order(
            "O-1",
            OrderSide::Buy,
            OrderType::Limit,
            1.0990,
            UnixNanos::new(61 * SEC_NANOS),
        )));
        assert_eq!(venue.broker.working_orders().len(), 1);

        // Book never crosses the limit price before the expire time passes
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 71));

        let types = event_types(&venue.sink.borrow());
        assert_eq!(types.last(), Some(&"OrderExpired"));
        assert!(venue.broker.working_orders().is_empty());
    }

    #[rstest]
    fn test_rollover_interest_triple_charge_on_wednesday() {
        let mut venue = venue();
        venue.broker.set_rollover_calculator(
            RolloverInterestCalculator::from_csv(
                "date,symbol,rate\n2024-01-01,EURUSD,0.0001\n".as_bytes(),
            )
            .unwrap(),
        );
        venue.database.borrow_mut().add_position(Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        ));

        // 2024-01-03 is a Wednesday; rollover is due at 17:00 New York less 56 minutes
        let morning = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.0999, 1.1001, UnixNanos::from_datetime_utc(morning)));
        assert!(venue.broker.total_rollover_interest().is_zero());

        let evening = Utc.with_ymd_and_hms(2024, 1, 3, 22, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.0999, 1.1001, UnixNanos::from_datetime_utc(evening)));

        // mid 1.1000 x 100,000 x 0.0001/day, tripled for the weekend settlement
        assert_eq!(venue.broker.total_rollover_interest(), usd(33.0));
        assert_eq!(venue.broker.account_capital(), usd(1_000_033.0));
        let state = last_account_state(&venue.sink.borrow());
        assert_eq!(state.cash_balance, usd(1_000_033.0));
        assert_eq!(state.cash_activity_day, usd(33.0));

        // A later tick on the same day must not charge again
        let later = Utc.with_ymd_and_hms(2024, 1, 3, 23, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.0999, 1.1001, UnixNanos::from_datetime_utc(later)));
        assert_eq!(venue.broker.total_rollover_interest(), usd(33.0));
    }

    #[rstest]
    fn test_rollover_interest_frozen_account_accumulates_without_capital_change() {
        let config = SimulatedBrokerConfig {
            frozen_account: true,
            ..Default::default()
        };
        let mut venue = venue_with(config, FillModel::default(), eurusd(0, 0));
        venue.broker.set_rollover_calculator(
            RolloverInterestCalculator::from_csv(
                "date,symbol,rate\n2024-01-01,EURUSD,0.0001\n".as_bytes(),
            )
            .unwrap(),
        );
        venue.database.borrow_mut().add_position(Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        ));

        let evening = Utc.with_ymd_and_hms(2024, 1, 3, 22, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.0999, 1.1001, UnixNanos::from_datetime_utc(evening)));

        assert_eq!(venue.broker.total_rollover_interest(), usd(33.0));
        assert_eq!(venue.broker.account_capital(), usd(1_000_000.0));
        assert!(!event_types(&venue.sink.borrow()).contains(&"AccountState"));
    }

    #[rstest]
    fn test_order_rejected_when_no_market_seen() {
        let mut venue = venue();
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Limit, 1.0990)));

        assert_eq!(event_types(&venue.sink.borrow()), ["OrderSubmitted", "OrderRejected"]);
        assert_eq!(
            last_rejected(&venue.sink.borrow()).reason.as_str(),
            "no market for EURUSD",
        );
    }

    #[rstest]
    fn test_buy_stop_at_exact_minimum_distance_is_accepted() {
        let mut venue = venue_with(SimulatedBrokerConfig::default(), FillModel::default(), eurusd(1, 1));
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));

        // Exactly ask + one tick of minimum distance: not rejected
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1003)));
        assert_eq!(venue.broker.working_orders().len(), 1);

        // One tick closer: rejected
        venue.broker.process(submit(priced_order("O-2", OrderSide::Buy, OrderType::Stop, 1.1002)));
        let rejected = last_rejected(&venue.sink.borrow());
        assert_eq!(rejected.order_id, OrderId::new("O-2"));
        assert_eq!(
            rejected.reason.as_str(),
            "BUY STOP order price of 1.1002 is too close to the market (ask price was 1.1002)",
        );
    }

    #[rstest]
    #[case(500.0, "order quantity of 500 is less than the minimum trade size of 1_000")]
    #[case(
        60_000_000.0,
        "order quantity of 60_000_000 exceeds the maximum trade size of 50_000_000"
    )]
    fn test_order_rejected_on_invalid_quantity(#[case] quantity: f64, #[case] reason: &str) {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(market_order("O-1", OrderSide::Buy, quantity)));

        assert_eq!(last_rejected(&venue.sink.borrow()).reason.as_str(), reason);
    }

    #[rstest]
    fn test_cancel_working_order_and_cancel_unknown() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));

        venue.broker.process(TradingCommand::CancelOrder(CancelOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-1"),
        }));
        assert!(venue.broker.working_orders().is_empty());
        assert_eq!(event_types(&venue.sink.borrow()).last(), Some(&"OrderCanceled"));

        venue.broker.process(TradingCommand::CancelOrder(CancelOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-1"),
        }));
        let types = event_types(&venue.sink.borrow());
        assert_eq!(types.last(), Some(&"OrderCancelRejected"));
    }

    #[rstest]
    fn test_modify_unknown_order_rejected() {
        let mut venue = venue();
        venue.broker.process(TradingCommand::ModifyOrder(ModifyOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-404"),
            modified_quantity: Quantity::new(1_000.0, 0),
            modified_price: Price::new(1.1000, 4),
        }));

        match &venue.sink.borrow().events[0] {
            Event::Order(OrderEventAny::CancelRejected(event)) => {
                assert_eq!(event.rejected_response_to.as_str(), "modify order");
                assert_eq!(event.reason.as_str(), "order not found");
            }
            event => panic!("unexpected event {event:?}"),
        }
    }

    #[rstest]
    fn test_modify_with_zero_quantity_rejected() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));

        venue.broker.process(TradingCommand::ModifyOrder(ModifyOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-1"),
            modified_quantity: Quantity::zero(0),
            modified_price: Price::new(1.1040, 4),
        }));

        match venue.sink.borrow().events.last().unwrap() {
            Event::Order(OrderEventAny::CancelRejected(event)) => {
                assert_eq!(event.reason.as_str(), "modified quantity was zero");
            }
            event => panic!("unexpected event {event:?}"),
        }
        assert_eq!(venue.broker.working_orders().len(), 1);
    }

    #[rstest]
    fn test_modify_with_invalid_price_rejects_the_order() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));

        // A buy stop repriced below the ask fails re-validation
        venue.broker.process(TradingCommand::ModifyOrder(ModifyOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-1"),
            modified_quantity: Quantity::new(100_000.0, 0),
            modified_price: Price::new(1.1001, 4),
        }));

        assert_eq!(event_types(&venue.sink.borrow()).last(), Some(&"OrderRejected"));
        assert!(venue.broker.working_orders().is_empty());
    }

    #[rstest]
    fn test_modify_emits_event_but_fills_use_the_original_price() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));

        venue.broker.process(TradingCommand::ModifyOrder(ModifyOrder {
            account_id: AccountId::new("SIM-001"),
            order_id: OrderId::new("O-1"),
            modified_quantity: Quantity::new(50_000.0, 0),
            modified_price: Price::new(1.1040, 4),
        }));

        match venue.sink.borrow().events.last().unwrap() {
            Event::Order(OrderEventAny::Modified(event)) => {
                assert_eq!(event.modified_quantity, Quantity::new(50_000.0, 0));
                assert_eq!(event.modified_price, Price::new(1.1040, 4));
            }
            event => panic!("unexpected event {event:?}"),
        }

        // The working order is untouched and still fills at its original price
        let stored = venue.broker.working_orders().get(&OrderId::new("O-1")).unwrap();
        assert_eq!(stored.price, Some(Price::new(1.1020, 4)));

        venue.broker.process_quote_tick(&quote(1.1018, 1.1020, 2));
        let fill = last_fill(&venue.sink.borrow());
        assert_eq!(fill.average_price, Price::new(1.1020, 4));
        assert_eq!(fill.filled_quantity, Quantity::new(100_000.0, 0));
    }

    #[rstest]
    fn test_closing_fill_adjusts_account_before_the_fill_event() {
        let mut venue = venue();
        venue.database.borrow_mut().add_position(Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        ));
        venue
            .database
            .borrow_mut()
            .index_order_position(OrderId::new("O-2"), PositionId::new("P-1"));

        venue.broker.process_quote_tick(&quote(1.1050, 1.1052, 1));
        venue.broker.process(submit(market_order("O-2", OrderSide::Sell, 100_000.0)));

        assert_eq!(
            event_types(&venue.sink.borrow()),
            ["OrderSubmitted", "OrderAccepted", "AccountState", "OrderFilled"],
        );

        // 50 pip gain on 100,000 less 0.20 bp commission on the 110,500 notional
        assert_eq!(venue.broker.account_capital(), usd(1_000_497.79));
        assert_eq!(venue.broker.cash_activity_day(), usd(497.79));
        assert_eq!(venue.broker.total_commissions(), usd(-2.21));
        assert_eq!(
            venue.broker.account_capital(),
            venue.broker.starting_capital() + usd(500.0) + venue.broker.total_commissions(),
        );
        let state = last_account_state(&venue.sink.borrow());
        assert_eq!(state.cash_balance, usd(1_000_497.79));
    }

    #[rstest]
    fn test_closing_fill_on_frozen_account_leaves_capital_unchanged() {
        let config = SimulatedBrokerConfig {
            frozen_account: true,
            ..Default::default()
        };
        let mut venue = venue_with(config, FillModel::default(), eurusd(0, 0));
        venue.database.borrow_mut().add_position(Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        ));
        venue
            .database
            .borrow_mut()
            .index_order_position(OrderId::new("O-2"), PositionId::new("P-1"));

        venue.broker.process_quote_tick(&quote(1.1050, 1.1052, 1));
        venue.broker.process(submit(market_order("O-2", OrderSide::Sell, 100_000.0)));

        assert_eq!(venue.broker.account_capital(), usd(1_000_000.0));
        assert_eq!(venue.broker.total_commissions(), usd(-2.21));
        assert!(!event_types(&venue.sink.borrow()).contains(&"AccountState"));
    }

    #[rstest]
    fn test_account_inquiry_reports_the_current_snapshot() {
        let mut venue = venue();
        venue.broker.process(TradingCommand::AccountInquiry(AccountInquiry {
            trader_id: TraderId::new("TESTER-001"),
            account_id: AccountId::new("SIM-001"),
        }));

        let state = last_account_state(&venue.sink.borrow());
        assert_eq!(state.account_id, AccountId::new("SIM-001"));
        assert_eq!(state.cash_balance, usd(1_000_000.0));
        assert_eq!(state.cash_start_day, usd(1_000_000.0));
        assert!(state.cash_activity_day.is_zero());
        assert!(state.margin_used_liquidation.is_zero());
        assert_eq!(state.margin_call_status, 'N');
    }

    #[rstest]
    fn test_new_calendar_day_resets_daily_cash_tracking() {
        let mut venue = venue();
        venue.database.borrow_mut().add_position(Position::new(
            PositionId::new("P-1"),
            Symbol::new("EURUSD"),
            MarketPosition::Long,
            Quantity::new(100_000.0, 0),
            Price::new(1.1000, 4),
            OrderSide::Buy,
        ));
        venue
            .database
            .borrow_mut()
            .index_order_position(OrderId::new("O-2"), PositionId::new("P-1"));

        let day_one = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.1050, 1.1052, UnixNanos::from_datetime_utc(day_one)));
        venue.broker.process(submit(market_order("O-2", OrderSide::Sell, 100_000.0)));
        assert_eq!(venue.broker.cash_activity_day(), usd(497.79));

        let day_two = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap();
        venue
            .broker
            .process_quote_tick(&quote_at(1.1050, 1.1052, UnixNanos::from_datetime_utc(day_two)));

        assert_eq!(venue.broker.cash_start_day(), usd(1_000_497.79));
        assert!(venue.broker.cash_activity_day().is_zero());
    }

    #[rstest]
    fn test_expired_atomic_entry_discards_children_and_their_oco_pair() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit_atomic(
            gtd_order("O-1", OrderSide::Buy, OrderType::Limit, 1.0990, UnixNanos::new(61 * SEC_NANOS)),
            priced_order("O-2", OrderSide::Sell, OrderType::Stop, 1.0980),
            Some(priced_order("O-3", OrderSide::Sell, OrderType::Limit, 1.1050)),
        ));
        assert_eq!(venue.broker.working_orders().len(), 1);
        assert_eq!(venue.broker.oco_orders().len(), 2);

        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 71));

        let types = event_types(&venue.sink.borrow());
        assert_eq!(types.last(), Some(&"OrderExpired"));
        assert!(venue.broker.working_orders().is_empty());
        assert!(venue.broker.atomic_child_orders().is_empty());
        assert!(venue.broker.oco_orders().is_empty());
        // The children never worked, so no cancellations are emitted for them
        assert!(!types.contains(&"OrderCanceled"));
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_duplicate_working_order_id_panics() {
        let mut venue = venue();
        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1020)));
        venue.broker.process(submit(priced_order("O-1", OrderSide::Buy, OrderType::Stop, 1.1030)));
    }

    fn run_scripted_backtest() -> String {
        let fill_model = FillModel::new(0.5, 0.5, 0.5, Some(42)).unwrap();
        let mut venue = venue_with(SimulatedBrokerConfig::default(), fill_model, eurusd(0, 0));

        venue.broker.process_quote_tick(&quote(1.1000, 1.1002, 1));
        venue.broker.process(submit_atomic(
            market_order("O-1", OrderSide::Buy, 100_000.0),
            priced_order("O-2", OrderSide::Sell, OrderType::Stop, 1.0980),
            Some(priced_order("O-3", OrderSide::Sell, OrderType::Limit, 1.1050)),
        ));
        venue.broker.process_quote_tick(&quote(1.1010, 1.1012, 2));
        venue.broker.process(submit(market_order("O-4", OrderSide::Buy, 100_000.0)));
        venue.broker.process_quote_tick(&quote(1.0980, 1.0982, 3));
        venue.broker.process(TradingCommand::AccountInquiry(AccountInquiry {
            trader_id: TraderId::new("TESTER-001"),
            account_id: AccountId::new("SIM-001"),
        }));

        serde_json::to_string(&venue.sink.borrow().events).unwrap()
    }

    #[rstest]
    fn test_identical_runs_emit_byte_identical_event_streams() {
        assert_eq!(run_scripted_backtest(), run_scripted_backtest());
    }
}

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

//! Simulated order execution for historical market data backtesting.
//!
//! The `fathom-backtest` crate provides a deterministic, event-driven broker
//! simulation. It consumes a time-ordered stream of top-of-book quotes and a
//! stream of trading commands, and synchronously emits broker-shaped execution
//! events while maintaining a single-currency cash account:
//!
//! - Stop, limit, stop-limit, market-if-touched and market order matching
//!   against top-of-book quotes, with configurable slippage and probabilistic
//!   marginal fills.
//! - Atomic (bracket) order and one-cancels-other linkage management.
//! - Price, size and market validation with broker-shaped rejections.
//! - Commission charges on fills and daily overnight rollover interest on
//!   open FX positions, with multi-currency PnL through an exchange rate
//!   graph.
//!
//! Given an identical configuration, fill model seed, tick sequence and
//! command sequence, the emitted event stream is byte-identical across runs.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod broker;
pub mod config;
pub mod database;
pub mod handler;
pub mod messages;
pub mod models;

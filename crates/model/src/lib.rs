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

//! The trading domain model for the Fathom backtesting workspace.
//!
//! The `fathom-model` crate defines the closed vocabulary the execution
//! simulator speaks:
//!
//! - Enumerations for order, position and market attributes.
//! - Interned string identifiers.
//! - Fixed-point `Price`, `Quantity` and `Money` value types with `Currency`.
//! - Market data (`QuoteTick`), instrument definitions, orders and positions.
//! - The execution event union emitted by the simulator.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod currencies;
pub mod data;
pub mod enums;
pub mod events;
pub mod identifiers;
pub mod instruments;
pub mod orders;
pub mod position;
pub mod types;

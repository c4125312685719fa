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

//! Core value types shared across the Fathom backtesting workspace.
//!
//! The `fathom-core` crate provides the foundational primitives the rest of the
//! workspace builds on:
//!
//! - `UnixNanos`: UNIX timestamps with nanosecond resolution.
//! - `UUID4`: RFC 4122 version 4 identifiers for events.
//! - Correctness checks in the *design by contract* style.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod correctness;
pub mod nanos;
pub mod uuid;

pub use crate::{nanos::UnixNanos, uuid::UUID4};

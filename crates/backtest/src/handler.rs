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

//! The sink execution events are delivered to.

use std::fmt::Debug;

use fathom_model::events::Event;

/// Receives the events emitted by the simulated broker.
///
/// Events are delivered synchronously, in generation order, from within the
/// engine's public operations; implementations must not re-enter the engine.
pub trait EventSink: Debug {
    /// Handles the given `event`.
    fn handle_event(&mut self, event: Event);
}

/// An event sink which records every delivered event, for test assertions and
/// post-run analysis.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    /// The recorded events in delivery order.
    pub events: Vec<Event>,
}

impl RecordingEventSink {
    /// Creates a new empty [`RecordingEventSink`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingEventSink {
    fn handle_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

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

//! Real-time and virtual clocks.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use fathom_core::UnixNanos;

/// A read/write clock the simulator advances from event timestamps.
pub trait Clock: Debug {
    /// Returns the current UNIX timestamp (nanoseconds).
    fn timestamp_ns(&self) -> UnixNanos;

    /// Returns the current UTC datetime.
    fn utc_now(&self) -> DateTime<Utc> {
        self.timestamp_ns().to_datetime_utc()
    }

    /// Sets the clock to the given time.
    fn set_time(&mut self, to_time_ns: UnixNanos);
}

/// A static test clock.
///
/// Stores the current timestamp internally, which is advanced (monotone
/// non-decreasing) by setting the time from processed event timestamps.
#[derive(Clone, Debug, Default)]
pub struct TestClock {
    time: UnixNanos,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance at the UNIX epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for TestClock {
    fn timestamp_ns(&self) -> UnixNanos {
        self.time
    }

    /// Sets the clock to the given time.
    ///
    /// # Panics
    ///
    /// Panics if `to_time_ns` is less than the current clock time.
    fn set_time(&mut self, to_time_ns: UnixNanos) {
        // Time should be non-decreasing
        assert!(
            to_time_ns >= self.time,
            "`to_time_ns` {to_time_ns} was < current clock time {}",
            self.time,
        );
        self.time = to_time_ns;
    }
}

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

//! A `UnixNanos` timestamp: nanoseconds since the UNIX epoch.

use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::correctness::{FAILED, check_predicate_true};

/// Represents a timestamp in nanoseconds since the UNIX epoch.
#[repr(C)]
#[derive(
    Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnixNanos(u64);

impl UnixNanos {
    /// Creates a new [`UnixNanos`] instance from the given `value`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value as a `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the underlying value as an `f64` of seconds.
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Converts the timestamp to a [`DateTime<Utc>`].
    ///
    /// # Panics
    ///
    /// Panics if the value is outside the representable `DateTime` range.
    #[must_use]
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(
            i64::try_from(self.0).expect("value exceeds `i64` nanosecond range"),
        )
    }

    /// Creates a new [`UnixNanos`] from the given UTC datetime.
    ///
    /// # Panics
    ///
    /// Panics if `datetime` is before the UNIX epoch.
    #[must_use]
    pub fn from_datetime_utc(datetime: DateTime<Utc>) -> Self {
        let nanos = datetime
            .timestamp_nanos_opt()
            .expect("datetime outside nanosecond-representable range");
        check_predicate_true(nanos >= 0, "datetime was before the UNIX epoch").expect(FAILED);
        Self(nanos as u64)
    }
}

impl From<u64> for UnixNanos {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UnixNanos> for u64 {
    fn from(value: UnixNanos) -> Self {
        value.0
    }
}

impl From<DateTime<Utc>> for UnixNanos {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime_utc(value)
    }
}

impl FromStr for UnixNanos {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl Add<u64> for UnixNanos {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0.checked_add(rhs).expect("overflow adding to `UnixNanos`"))
    }
}

impl Sub<u64> for UnixNanos {
    type Output = Self;

    fn sub(self, rhs: u64) -> Self::Output {
        Self(self.0.checked_sub(rhs).expect("underflow subtracting from `UnixNanos`"))
    }
}

impl AddAssign<u64> for UnixNanos {
    fn add_assign(&mut self, rhs: u64) {
        *self = *self + rhs;
    }
}

impl SubAssign<u64> for UnixNanos {
    fn sub_assign(&mut self, rhs: u64) {
        *self = *self - rhs;
    }
}

impl PartialEq<u64> for UnixNanos {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl Debug for UnixNanos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", stringify!(UnixNanos), self.0)
    }
}

impl Display for UnixNanos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_and_accessors() {
        let nanos = UnixNanos::new(123_456_789);
        assert_eq!(nanos.as_u64(), 123_456_789);
        assert_eq!(nanos, 123_456_789);
    }

    #[rstest]
    fn test_datetime_round_trip() {
        let datetime = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let nanos = UnixNanos::from_datetime_utc(datetime);
        assert_eq!(nanos.to_datetime_utc(), datetime);
    }

    #[rstest]
    fn test_arithmetic() {
        let nanos = UnixNanos::new(1_000);
        assert_eq!((nanos + 500).as_u64(), 1_500);
        assert_eq!((nanos - 500).as_u64(), 500);
    }

    #[rstest]
    #[should_panic(expected = "underflow")]
    fn test_subtraction_underflow_panics() {
        let _ = UnixNanos::new(0) - 1;
    }

    #[rstest]
    fn test_ordering() {
        assert!(UnixNanos::new(1) < UnixNanos::new(2));
        assert!(UnixNanos::new(2) >= UnixNanos::new(2));
    }

    #[rstest]
    fn test_serde_as_u64() {
        let nanos = UnixNanos::new(42);
        let json = serde_json::to_string(&nanos).unwrap();
        assert_eq!(json, "42");
        let parsed: UnixNanos = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, nanos);
    }
}

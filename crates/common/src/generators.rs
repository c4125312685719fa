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

//! Event id generation.

use std::fmt::Debug;

use fathom_core::UUID4;

/// Generates unique event ids.
///
/// Implementations must yield a distinct id per call; a deterministic
/// implementation additionally yields the same id sequence per run, which is
/// what makes two identically configured backtests emit identical event
/// streams.
pub trait GuidFactory: Debug {
    /// Generates a new unique event id.
    fn generate(&mut self) -> UUID4;
}

/// Generates random version 4 UUIDs.
#[derive(Clone, Debug, Default)]
pub struct RandomGuidFactory;

impl GuidFactory for RandomGuidFactory {
    fn generate(&mut self) -> UUID4 {
        UUID4::new()
    }
}

/// Generates a reproducible sequence of version 4 shaped UUIDs from a counter.
#[derive(Clone, Debug, Default)]
pub struct DeterministicGuidFactory {
    count: u128,
}

impl DeterministicGuidFactory {
    /// Creates a new [`DeterministicGuidFactory`] instance starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuidFactory for DeterministicGuidFactory {
    fn generate(&mut self) -> UUID4 {
        let uuid = UUID4::from_u128(self.count);
        self.count += 1;
        uuid
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_random_factory_yields_distinct_ids() {
        let mut factory = RandomGuidFactory;
        assert_ne!(factory.generate(), factory.generate());
    }

    #[rstest]
    fn test_deterministic_factory_is_reproducible() {
        let mut a = DeterministicGuidFactory::new();
        let mut b = DeterministicGuidFactory::new();
        let ids_a: Vec<UUID4> = (0..8).map(|_| a.generate()).collect();
        let ids_b: Vec<UUID4> = (0..8).map(|_| b.generate()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[rstest]
    fn test_deterministic_factory_yields_distinct_ids() {
        let mut factory = DeterministicGuidFactory::new();
        let first = factory.generate();
        let second = factory.generate();
        assert_ne!(first, second);
    }
}

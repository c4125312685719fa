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

//! The stochastic oracle deciding slipped and marginal fills.

use std::fmt::Display;

use fathom_core::correctness::{FAILED, check_in_range_inclusive_f64};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A probabilistic model deciding order fill behavior at the touch.
///
/// Seed the model to make a backtest reproducible; an unseeded model draws
/// its seed from the operating system.
#[derive(Clone, Debug)]
pub struct FillModel {
    /// The probability of limit order filling if the market rests on its price.
    prob_fill_on_limit: f64,
    /// The probability of stop orders filling if the market rests on its price.
    prob_fill_on_stop: f64,
    /// The probability of order fill prices slipping by one tick.
    prob_slippage: f64,
    /// Random number generator
    rng: StdRng,
}

impl FillModel {
    /// Creates a new [`FillModel`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if any probability parameter is outside the range [0, 1].
    pub fn new(
        prob_fill_on_limit: f64,
        prob_fill_on_stop: f64,
        prob_slippage: f64,
        random_seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        check_in_range_inclusive_f64(prob_fill_on_limit, 0.0, 1.0, "prob_fill_on_limit")?;
        check_in_range_inclusive_f64(prob_fill_on_stop, 0.0, 1.0, "prob_fill_on_stop")?;
        check_in_range_inclusive_f64(prob_slippage, 0.0, 1.0, "prob_slippage")?;
        let rng = match random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            prob_fill_on_limit,
            prob_fill_on_stop,
            prob_slippage,
            rng,
        })
    }

    /// Returns `true` if a limit order resting exactly on the touch price
    /// should be filled.
    pub fn is_limit_filled(&mut self) -> bool {
        self.event_success(self.prob_fill_on_limit)
    }

    /// Returns `true` if a stop order resting exactly on the touch price
    /// should be filled.
    pub fn is_stop_filled(&mut self) -> bool {
        self.event_success(self.prob_fill_on_stop)
    }

    /// Returns `true` if an order fill price should slip by one tick.
    pub fn is_slipped(&mut self) -> bool {
        self.event_success(self.prob_slippage)
    }

    fn event_success(&mut self, probability: f64) -> bool {
        match probability {
            0.0 => false,
            1.0 => true,
            _ => self.rng.random_bool(probability),
        }
    }
}

impl Display for FillModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FillModel(prob_fill_on_limit: {}, prob_fill_on_stop: {}, prob_slippage: {})",
            self.prob_fill_on_limit, self.prob_fill_on_stop, self.prob_slippage
        )
    }
}

impl Default for FillModel {
    /// Creates a new default [`FillModel`] instance with all fills certain and
    /// no slippage.
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, None).expect(FAILED)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn fill_model() -> FillModel {
        let seed = 42;
        FillModel::new(0.5, 0.5, 0.1, Some(seed)).unwrap()
    }

    #[rstest]
    #[case(1.1, 0.5, 0.1)]
    #[case(0.5, 1.1, 0.1)]
    #[case(0.5, 0.5, 1.1)]
    #[case(-0.1, 0.5, 0.1)]
    fn test_probability_out_of_range_errors(
        #[case] prob_fill_on_limit: f64,
        #[case] prob_fill_on_stop: f64,
        #[case] prob_slippage: f64,
    ) {
        let result = FillModel::new(prob_fill_on_limit, prob_fill_on_stop, prob_slippage, None);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_certain_probabilities_bypass_the_rng() {
        let mut model = FillModel::new(1.0, 0.0, 0.0, None).unwrap();
        assert!(model.is_limit_filled());
        assert!(!model.is_stop_filled());
        assert!(!model.is_slipped());
    }

    #[rstest]
    fn test_seeded_model_is_reproducible(mut fill_model: FillModel) {
        let mut other = FillModel::new(0.5, 0.5, 0.1, Some(42)).unwrap();
        let draws: Vec<bool> = (0..32).map(|_| fill_model.is_limit_filled()).collect();
        let other_draws: Vec<bool> = (0..32).map(|_| other.is_limit_filled()).collect();
        assert_eq!(draws, other_draws);
    }
}

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

//! The table of per-symbol overnight rollover interest rates.

use std::{
    collections::{BTreeMap, HashMap},
    io::Read,
    path::Path,
};

use anyhow::Context;
use chrono::NaiveDate;
use fathom_model::identifiers::Symbol;
use serde::Deserialize;

/// A single rate record as laid out in the short-term interest CSV file.
#[derive(Debug, Deserialize)]
struct RateRecord {
    date: NaiveDate,
    symbol: String,
    rate: f64,
}

/// Provides per-symbol overnight interest rates keyed by effective date.
///
/// The rate effective for a query date is the one with the latest tabled date
/// not after the query date.
#[derive(Clone, Debug, Default)]
pub struct RolloverInterestCalculator {
    rates: HashMap<Symbol, BTreeMap<NaiveDate, f64>>,
}

impl RolloverInterestCalculator {
    /// Creates a new [`RolloverInterestCalculator`] by loading the CSV file at
    /// the given `path`.
    ///
    /// The expected layout is `date,symbol,rate` with ISO 8601 dates and
    /// per-day decimal rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a record cannot be parsed.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open rate CSV file at {}", path.display()))?;
        Self::from_csv_reader(reader)
    }

    /// Creates a new [`RolloverInterestCalculator`] from any CSV source, e.g.
    /// an in-memory byte slice.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be parsed.
    pub fn from_csv<R: Read>(source: R) -> anyhow::Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(source))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Self> {
        let mut rates: HashMap<Symbol, BTreeMap<NaiveDate, f64>> = HashMap::new();
        for result in reader.deserialize() {
            let record: RateRecord = result.context("failed to parse rate CSV record")?;
            rates
                .entry(Symbol::new(&record.symbol))
                .or_default()
                .insert(record.date, record.rate);
        }
        Ok(Self { rates })
    }

    /// Returns the overnight rate for `symbol` effective on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if no rate is tabled for the symbol on or before the
    /// given date.
    pub fn overnight_rate(&self, symbol: Symbol, date: NaiveDate) -> anyhow::Result<f64> {
        let table = self
            .rates
            .get(&symbol)
            .with_context(|| format!("no overnight rates tabled for symbol {symbol}"))?;
        let (_, rate) = table
            .range(..=date)
            .next_back()
            .with_context(|| format!("no overnight rate for {symbol} on or before {date}"))?;
        Ok(*rate)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const RATES_CSV: &str = "\
date,symbol,rate
2024-01-01,EURUSD,0.0001
2024-01-03,EURUSD,0.0002
2024-01-01,USDJPY,-0.0001
";

    #[fixture]
    fn calculator() -> RolloverInterestCalculator {
        RolloverInterestCalculator::from_csv(RATES_CSV.as_bytes()).unwrap()
    }

    #[rstest]
    fn test_exact_date_lookup(calculator: RolloverInterestCalculator) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rate = calculator.overnight_rate(Symbol::new("EURUSD"), date).unwrap();
        assert_eq!(rate, 0.0001);
    }

    #[rstest]
    fn test_latest_effective_rate_applies(calculator: RolloverInterestCalculator) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rate = calculator.overnight_rate(Symbol::new("EURUSD"), date).unwrap();
        assert_eq!(rate, 0.0001);

        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let rate = calculator.overnight_rate(Symbol::new("EURUSD"), date).unwrap();
        assert_eq!(rate, 0.0002);
    }

    #[rstest]
    fn test_negative_rates_supported(calculator: RolloverInterestCalculator) {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let rate = calculator.overnight_rate(Symbol::new("USDJPY"), date).unwrap();
        assert_eq!(rate, -0.0001);
    }

    #[rstest]
    fn test_missing_symbol_errors(calculator: RolloverInterestCalculator) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(calculator.overnight_rate(Symbol::new("GBPUSD"), date).is_err());
    }

    #[rstest]
    fn test_date_before_first_record_errors(calculator: RolloverInterestCalculator) {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(calculator.overnight_rate(Symbol::new("EURUSD"), date).is_err());
    }

    #[rstest]
    fn test_malformed_csv_errors() {
        let result = RolloverInterestCalculator::from_csv(
            "date,symbol,rate\nnot-a-date,EURUSD,0.1\n".as_bytes(),
        );
        assert!(result.is_err());
    }
}

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

//! Exchange rate calculations between currencies.
//!
//! An exchange rate is the value of one currency versus that of another. Rates
//! are resolved from a snapshot of bid and ask quotes keyed by 6-letter FX
//! symbol (base currency followed by quote currency): directly, through the
//! inverse pair, or triangulated through a common currency.

use std::collections::{HashMap, HashSet};

use fathom_core::correctness::{FAILED, check_equal, check_map_not_empty};
use fathom_model::{enums::PriceType, identifiers::Symbol, types::Currency};
use itertools::Itertools;
use rust_decimal::Decimal;
use ustr::Ustr;

/// Returns the calculated exchange rate from `from_currency` to `to_currency`
/// for the given price type, using the given bid and ask quote snapshots.
///
/// Returns [`Decimal::ONE`] when the currencies are equal, and
/// [`Decimal::ZERO`] when no conversion path exists in the snapshot.
///
/// # Panics
///
/// Panics if either quote map is empty, if the maps differ in length, or if
/// `price_type` is `LAST`.
#[must_use]
pub fn get_exchange_rate(
    from_currency: Currency,
    to_currency: Currency,
    price_type: PriceType,
    quotes_bid: &HashMap<Symbol, Decimal>,
    quotes_ask: &HashMap<Symbol, Decimal>,
) -> Decimal {
    if from_currency == to_currency {
        return Decimal::ONE;
    }

    check_map_not_empty(quotes_bid, stringify!(quotes_bid)).expect(FAILED);
    check_map_not_empty(quotes_ask, stringify!(quotes_ask)).expect(FAILED);
    check_equal(
        quotes_bid.len(),
        quotes_ask.len(),
        "quotes_bid.len()",
        "quotes_ask.len()",
    )
    .expect(FAILED);

    let calculation_quotes = match price_type {
        PriceType::Bid => quotes_bid.clone(),
        PriceType::Ask => quotes_ask.clone(),
        PriceType::Mid => quotes_bid
            .iter()
            .map(|(symbol, bid)| {
                let ask = quotes_ask.get(symbol).unwrap_or(bid);
                (*symbol, (bid + ask) / Decimal::TWO)
            })
            .collect(),
        PriceType::Last => panic!("cannot calculate exchange rate for price type {price_type}"),
    };

    let mut codes: HashSet<Ustr> = HashSet::new();
    let mut rates: HashMap<Ustr, HashMap<Ustr, Decimal>> = HashMap::new();

    // Seed the rate graph with the quoted pairs
    for (symbol, quote) in &calculation_quotes {
        let (base, term) = match symbol.base_quote() {
            Ok(pieces) => pieces,
            Err(_) => {
                log::warn!("Cannot parse symbol {symbol} as a currency pair");
                continue;
            }
        };
        codes.insert(base);
        codes.insert(term);

        let rates_base = rates.entry(base).or_default();
        rates_base.insert(base, Decimal::ONE);
        rates_base.insert(term, *quote);
        rates.entry(term).or_default().insert(term, Decimal::ONE);
    }

    // A stable iteration order keeps triangulation deterministic across runs
    let mut sorted_codes: Vec<Ustr> = codes.into_iter().collect();
    sorted_codes.sort_unstable();

    let code_perms: Vec<(Ustr, Ustr)> = sorted_codes
        .iter()
        .cartesian_product(sorted_codes.iter())
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (*a, *b))
        .collect();

    // Insert inverse rates for every directly quoted pair
    for (lhs, rhs) in &code_perms {
        let direct = rates.get(lhs).and_then(|table| table.get(rhs)).copied();
        if let Some(rate) = direct {
            if rate != Decimal::ZERO {
                let inverse_table = rates.entry(*rhs).or_default();
                if !inverse_table.contains_key(lhs) {
                    inverse_table.insert(*lhs, Decimal::ONE / rate);
                }
            }
        }
    }

    if let Some(rate) = rates.get(&from_currency.code).and_then(|table| table.get(&to_currency.code))
    {
        return *rate;
    }

    // Triangulate remaining pairs through a common currency
    for (lhs, rhs) in &code_perms {
        if rates.get(lhs).is_some_and(|table| table.contains_key(rhs)) {
            continue;
        }

        let through_common = sorted_codes.iter().find_map(|code| {
            let lhs_to_code = rates.get(lhs).and_then(|table| table.get(code)).copied()?;
            let code_to_rhs = rates.get(code).and_then(|table| table.get(rhs)).copied()?;
            Some(lhs_to_code * code_to_rhs)
        });

        if let Some(rate) = through_common {
            rates.entry(*lhs).or_default().insert(*rhs, rate);
            if rate != Decimal::ZERO {
                let inverse_table = rates.entry(*rhs).or_default();
                if !inverse_table.contains_key(lhs) {
                    inverse_table.insert(*lhs, Decimal::ONE / rate);
                }
            }
        }
    }

    rates
        .get(&from_currency.code)
        .and_then(|table| table.get(&to_currency.code))
        .copied()
        .unwrap_or(Decimal::ZERO)
}

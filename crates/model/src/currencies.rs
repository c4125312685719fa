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

//! The registry of currencies used in FX backtests.

use std::{collections::HashMap, sync::LazyLock};

use ustr::Ustr;

use crate::{enums::CurrencyType, types::Currency};

/// The global currency map keyed by alpha-3 code.
pub static CURRENCY_MAP: LazyLock<HashMap<&'static str, Currency>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (code, precision, iso4217, name) in [
        ("AUD", 2, 36, "Australian dollar"),
        ("CAD", 2, 124, "Canadian dollar"),
        ("CHF", 2, 756, "Swiss franc"),
        ("EUR", 2, 978, "Euro"),
        ("GBP", 2, 826, "British pound"),
        ("JPY", 0, 392, "Japanese yen"),
        ("NOK", 2, 578, "Norwegian krone"),
        ("NZD", 2, 554, "New Zealand dollar"),
        ("SEK", 2, 752, "Swedish krona"),
        ("USD", 2, 840, "United States dollar"),
    ] {
        map.insert(
            code,
            Currency {
                code: Ustr::from(code),
                precision,
                iso4217,
                name: Ustr::from(name),
                currency_type: CurrencyType::Fiat,
            },
        );
    }
    map
});

macro_rules! currency_accessor {
    ($name:ident) => {
        #[allow(non_snake_case)]
        impl Currency {
            #[doc = concat!("Returns the `", stringify!($name), "` currency.")]
            #[must_use]
            pub fn $name() -> Self {
                *CURRENCY_MAP.get(stringify!($name)).expect("currency registered")
            }
        }
    };
}

currency_accessor!(AUD);
currency_accessor!(CAD);
currency_accessor!(CHF);
currency_accessor!(EUR);
currency_accessor!(GBP);
currency_accessor!(JPY);
currency_accessor!(NOK);
currency_accessor!(NZD);
currency_accessor!(SEK);
currency_accessor!(USD);

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

//! Interned string identifiers for the trading domain model.

use std::fmt::{Debug, Display, Formatter};

use fathom_core::correctness::{FAILED, check_valid_string};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(
            Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(Ustr);

        impl $name {
            /// Creates a new identifier with correctness checking.
            ///
            /// # Errors
            ///
            /// Returns an error if `value` is not a valid string.
            pub fn new_checked<T: AsRef<str>>(value: T) -> anyhow::Result<Self> {
                let value = value.as_ref();
                check_valid_string(value, stringify!(value))?;
                Ok(Self(Ustr::from(value)))
            }

            /// Creates a new identifier.
            ///
            /// # Panics
            ///
            /// Panics if `value` is not a valid string.
            pub fn new<T: AsRef<str>>(value: T) -> Self {
                Self::new_checked(value).expect(FAILED)
            }

            /// Returns the inner identifier value.
            #[must_use]
            pub const fn inner(&self) -> Ustr {
                self.0
            }

            /// Returns the inner identifier value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:?}", self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<Ustr> for $name {
            fn from(value: Ustr) -> Self {
                Self(value)
            }
        }
    };
}

identifier!(
    /// Represents a valid ticker symbol for a tradable instrument.
    ///
    /// FX symbols are the 6-letter concatenation of base and quote currency
    /// codes (e.g. `EURUSD`).
    Symbol
);

identifier!(
    /// Represents a valid trader ID.
    TraderId
);

identifier!(
    /// Represents a valid strategy ID.
    StrategyId
);

identifier!(
    /// Represents a valid account ID.
    AccountId
);

identifier!(
    /// Represents a valid client order ID.
    OrderId
);

identifier!(
    /// Represents an order ID assigned by the broker on acceptance.
    OrderIdBroker
);

identifier!(
    /// Represents an execution ID assigned by the broker on a fill.
    ExecutionId
);

identifier!(
    /// Represents a valid position ID.
    PositionId
);

identifier!(
    /// Represents a position ID assigned by the broker on a fill.
    PositionIdBroker
);

impl Symbol {
    /// Splits a 6-letter FX symbol into its base and quote currency codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is not exactly six characters.
    pub fn base_quote(&self) -> anyhow::Result<(Ustr, Ustr)> {
        let value = self.as_str();
        if value.len() != 6 {
            anyhow::bail!("symbol '{value}' is not a 6-letter currency pair");
        }
        let (base, quote) = value.split_at(3);
        Ok((Ustr::from(base), Ustr::from(quote)))
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
    fn test_identifier_construction_and_display() {
        let symbol = Symbol::new("EURUSD");
        assert_eq!(symbol.as_str(), "EURUSD");
        assert_eq!(format!("{symbol}"), "EURUSD");
        assert_eq!(format!("{symbol:?}"), "\"EURUSD\"");
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_identifier_empty_panics() {
        let _ = OrderId::new("");
    }

    #[rstest]
    fn test_identifier_equality_and_interning() {
        let a = OrderId::new("O-123");
        let b = OrderId::new("O-123");
        let c = OrderId::new("O-124");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[rstest]
    fn test_symbol_base_quote() {
        let (base, quote) = Symbol::new("AUDJPY").base_quote().unwrap();
        assert_eq!(base.as_str(), "AUD");
        assert_eq!(quote.as_str(), "JPY");
    }

    #[rstest]
    fn test_symbol_base_quote_invalid_length() {
        assert!(Symbol::new("SPX").base_quote().is_err());
    }
}

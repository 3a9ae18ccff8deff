use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Stock ticker, e.g. `AAPL`; always stored upper case.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ticker = s.trim();
        if ticker.is_empty() || ticker.chars().any(char::is_whitespace) {
            return Err(Error::Parse(format!("\"{s}\" is not a ticker symbol")));
        }
        Ok(Symbol(ticker.to_uppercase()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -------------------------------------------------------------------------------------------------

/// Pre-bucketed history window served by the stocks API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeKey {
    OneMonth,
    ThreeMonths,
    /// Present in some upstream datasets, never offered as a range button.
    SixMonths,
    OneYear,
    #[default]
    FiveYears,
}

impl RangeKey {
    pub const ALL: [RangeKey; 5] = [
        RangeKey::OneMonth,
        RangeKey::ThreeMonths,
        RangeKey::SixMonths,
        RangeKey::OneYear,
        RangeKey::FiveYears,
    ];

    /// The ranges offered for selection.
    pub const UI: [RangeKey; 4] = [
        RangeKey::OneMonth,
        RangeKey::ThreeMonths,
        RangeKey::OneYear,
        RangeKey::FiveYears,
    ];

    /// Identifier used as the key inside `stocksData`.
    pub fn as_str(self) -> &'static str {
        match self {
            RangeKey::OneMonth => "1mo",
            RangeKey::ThreeMonths => "3mo",
            RangeKey::SixMonths => "6mo",
            RangeKey::OneYear => "1y",
            RangeKey::FiveYears => "5y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RangeKey::OneMonth => "1 month",
            RangeKey::ThreeMonths => "3 months",
            RangeKey::SixMonths => "6 months",
            RangeKey::OneYear => "1 year",
            RangeKey::FiveYears => "5 years",
        }
    }
}

impl FromStr for RangeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        RangeKey::ALL
            .into_iter()
            .find(|range| range.as_str() == key)
            .ok_or_else(|| {
                Error::Parse(format!(
                    "\"{s}\" is not a range; expected one of 1mo, 3mo, 6mo, 1y, 5y"
                ))
            })
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RangeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// -------------------------------------------------------------------------------------------------

const DEFAULT_TICKERS: [&str; 10] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "PYPL", "TSLA", "JPM", "NVDA", "NFLX", "DIS",
];

/// Ordered set of symbols shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist(Vec<Symbol>);

impl Watchlist {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self> {
        let mut unique: Vec<Symbol> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }
        if unique.is_empty() {
            return Err(Error::Config("watchlist holds no symbols".to_string()));
        }
        Ok(Watchlist(unique))
    }

    /// Parse a comma separated list, e.g. `"AAPL, msft,NVDA"`.
    pub fn parse(list: &str) -> Result<Self> {
        let symbols = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Symbol::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn first(&self) -> &Symbol {
        // `new` refuses an empty list
        &self.0[0]
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.0.contains(symbol)
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Watchlist(
            DEFAULT_TICKERS
                .iter()
                .map(|ticker| Symbol(ticker.to_string()))
                .collect(),
        )
    }
}

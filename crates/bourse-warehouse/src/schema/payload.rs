use super::{RangeKey, Symbol};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap as Map;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Stocks API payloads
//
// Each endpoint wraps a single-element array holding a map keyed by ticker:
//
//     { "stocksData": [ { "AAPL": { "1mo": { "timeStamp": [..], "value": [..] }, .. }, .. } ] }
//     { "stocksStatsData": [ { "AAPL": { "bookValue": 4.38, "profit": 0.47 }, .. } ] }
//     { "stocksProfileData": [ { "AAPL": { "summary": "Apple Inc. designs .." }, .. } ] }
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Price history per symbol, per range.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChartsPayload {
    #[serde(rename = "stocksData")]
    pub stocks_data: Vec<Map<String, Map<String, Series>>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Series {
    #[serde(rename = "timeStamp", deserialize_with = "de_timestamps")]
    pub timestamps: Vec<i64>,
    /// Gaps arrive as `null`; extraction refuses a series holding one.
    #[serde(rename = "value")]
    pub values: Vec<Option<f64>>,
}

/// Book value & profit per symbol.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StatsPayload {
    #[serde(rename = "stocksStatsData")]
    pub stocks_stats_data: Vec<Map<String, StockStats>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct StockStats {
    #[serde(rename = "bookValue")]
    pub book_value: f64,
    /// Percentage; its sign picks the display colour.
    pub profit: f64,
}

/// Company summary per symbol.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProfilePayload {
    #[serde(rename = "stocksProfileData")]
    pub stocks_profile_data: Vec<Map<String, StockProfile>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StockProfile {
    pub summary: String,
}

// -------------------------------------------------------------------------------------------------
// Lookups

fn unwrap_single<'a, T>(wrapper: &'a [T], field: &str) -> Result<&'a T> {
    wrapper
        .first()
        .ok_or_else(|| Error::MalformedPayload(format!("\"{field}\" holds no entries")))
}

impl ChartsPayload {
    pub fn series(&self, symbol: &Symbol, range: RangeKey) -> Result<&Series> {
        let ranges = unwrap_single(&self.stocks_data, "stocksData")?
            .get(symbol.as_str())
            .ok_or_else(|| Error::key_not_found("symbol", symbol.as_str()))?;
        ranges
            .get(range.as_str())
            .ok_or_else(|| Error::key_not_found("range", format!("{symbol} {range}")))
    }
}

impl StatsPayload {
    pub fn stats(&self, symbol: &Symbol) -> Result<&StockStats> {
        unwrap_single(&self.stocks_stats_data, "stocksStatsData")?
            .get(symbol.as_str())
            .ok_or_else(|| Error::key_not_found("symbol stats", symbol.as_str()))
    }
}

impl ProfilePayload {
    pub fn profile(&self, symbol: &Symbol) -> Result<&StockProfile> {
        unwrap_single(&self.stocks_profile_data, "stocksProfileData")?
            .get(symbol.as_str())
            .ok_or_else(|| Error::key_not_found("symbol profile", symbol.as_str()))
    }
}

// -------------------------------------------------------------------------------------------------

/// Timestamps are epoch seconds; some feeds send them as `1696118400.0`.
pub fn de_timestamps<'de, D>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamps: Vec<serde_json::Number> = Deserialize::deserialize(deserializer)?;
    timestamps
        .into_iter()
        .map(|number| {
            if let Some(secs) = number.as_i64() {
                return Ok(secs);
            }
            match number.as_f64() {
                Some(secs) if secs.fract() == 0.0 && secs.abs() < i64::MAX as f64 => {
                    Ok(secs as i64)
                }
                _ => Err(serde::de::Error::custom(format!(
                    "expected whole epoch seconds, found {number}"
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARTS: &str = r#"{
        "stocksData": [{
            "AAPL": {
                "1mo": { "timeStamp": [1000, 2000.0], "value": [1.5, null] },
                "5y": { "timeStamp": [3000], "value": [2.25] }
            }
        }]
    }"#;

    #[test]
    fn charts_payload_reads_wire_shape() {
        let charts: ChartsPayload = serde_json::from_str(CHARTS).unwrap();
        let aapl: Symbol = "AAPL".parse().unwrap();

        let month = charts.series(&aapl, RangeKey::OneMonth).unwrap();
        assert_eq!(month.timestamps, vec![1000, 2000]);
        assert_eq!(month.values, vec![Some(1.5), None]);
    }

    #[test]
    fn fractional_timestamps_are_rejected() {
        let json = r#"{ "timeStamp": [1000.5], "value": [1.0] }"#;
        assert!(serde_json::from_str::<Series>(json).is_err());
    }

    #[test]
    fn missing_symbol_and_range_are_key_errors() {
        let charts: ChartsPayload = serde_json::from_str(CHARTS).unwrap();
        let aapl: Symbol = "AAPL".parse().unwrap();
        let msft: Symbol = "MSFT".parse().unwrap();

        assert!(matches!(
            charts.series(&msft, RangeKey::FiveYears),
            Err(Error::KeyNotFound { what: "symbol", .. })
        ));
        assert!(matches!(
            charts.series(&aapl, RangeKey::OneYear),
            Err(Error::KeyNotFound { what: "range", .. })
        ));
    }

    #[test]
    fn empty_wrapper_is_malformed() {
        let stats: StatsPayload = serde_json::from_str(r#"{ "stocksStatsData": [] }"#).unwrap();
        let aapl: Symbol = "AAPL".parse().unwrap();
        assert!(matches!(
            stats.stats(&aapl),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn stats_and_profile_lookups() {
        let stats: StatsPayload = serde_json::from_str(
            r#"{ "stocksStatsData": [{ "AAPL": { "bookValue": 4.38, "profit": -0.47 } }] }"#,
        )
        .unwrap();
        let profiles: ProfilePayload = serde_json::from_str(
            r#"{ "stocksProfileData": [{ "AAPL": { "summary": "Makes phones." } }] }"#,
        )
        .unwrap();
        let aapl: Symbol = "AAPL".parse().unwrap();

        assert_eq!(
            *stats.stats(&aapl).unwrap(),
            StockStats {
                book_value: 4.38,
                profit: -0.47
            }
        );
        assert_eq!(profiles.profile(&aapl).unwrap().summary, "Makes phones.");
    }
}

use crate::error::{Error, Result};
use crate::schema::{
    ChartPoint, ChartsPayload, Price, ProfilePayload, RangeKey, Series, StatsPayload, Symbol,
};
use serde::Serialize;

/// Chart-ready view of one symbol over one range.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Extraction {
    pub symbol: Symbol,
    pub range: RangeKey,
    pub points: Vec<ChartPoint>,
    /// Lowest rounded price in `points`.
    pub min: Price,
    /// Highest rounded price in `points`.
    pub max: Price,
    pub book_value: f64,
    pub profit: f64,
    pub summary: String,
}

impl Extraction {
    /// Left edge of the chart's time axis, in epoch milliseconds.
    ///
    /// Always `Some` for the output of [`extract`], which refuses empty series.
    pub fn window_start(&self) -> Option<i64> {
        self.points.first().map(|point| point.epoch_millis)
    }

    /// Right edge of the chart's time axis, in epoch milliseconds.
    pub fn window_end(&self) -> Option<i64> {
        self.points.last().map(|point| point.epoch_millis)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn tone(&self) -> Tone {
        Tone::of(self.profit)
    }
}

/// Whether a profit reads as a gain (green) or a loss (red).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
}

impl Tone {
    /// Zero profit counts as a loss.
    pub fn of(profit: f64) -> Self {
        if profit > 0.0 {
            Tone::Gain
        } else {
            Tone::Loss
        }
    }
}

/// One row of the watchlist: headline stats for a symbol.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StockOverview {
    pub symbol: Symbol,
    pub book_value: f64,
    pub profit: f64,
}

impl StockOverview {
    pub fn tone(&self) -> Tone {
        Tone::of(self.profit)
    }
}

/// Build the chart points, extrema & pass-through fields for `symbol` over `range`.
///
/// Every value is rounded to cents before it is compared, so `min` & `max`
/// are always prices that appear in `points`. The payloads are only read.
pub fn extract(
    charts: &ChartsPayload,
    stats: &StatsPayload,
    profiles: &ProfilePayload,
    symbol: &Symbol,
    range: RangeKey,
) -> Result<Extraction> {
    let series = charts.series(symbol, range)?;
    let (points, min, max) = chart_points(series, symbol, range)?;

    let stock_stats = stats.stats(symbol)?;
    let profile = profiles.profile(symbol)?;

    Ok(Extraction {
        symbol: symbol.clone(),
        range,
        points,
        min,
        max,
        book_value: stock_stats.book_value,
        profit: stock_stats.profit,
        summary: profile.summary.clone(),
    })
}

/// Headline stats for `symbol`.
pub fn overview(stats: &StatsPayload, symbol: &Symbol) -> Result<StockOverview> {
    let stock_stats = stats.stats(symbol)?;
    Ok(StockOverview {
        symbol: symbol.clone(),
        book_value: stock_stats.book_value,
        profit: stock_stats.profit,
    })
}

fn chart_points(
    series: &Series,
    symbol: &Symbol,
    range: RangeKey,
) -> Result<(Vec<ChartPoint>, Price, Price)> {
    let (timestamps, values) = (&series.timestamps, &series.values);
    let malformed =
        |reason: String| Error::MalformedPayload(format!("[{symbol}] {range}: {reason}"));

    if timestamps.len() != values.len() {
        return Err(malformed(format!(
            "{} timestamps against {} values",
            timestamps.len(),
            values.len()
        )));
    }
    if timestamps.is_empty() {
        return Err(malformed("empty series".to_string()));
    }

    let rounded = |i: usize| -> Result<Price> {
        values[i]
            .and_then(Price::round)
            .ok_or_else(|| malformed(format!("no usable value at index {i}")))
    };

    let mut min = rounded(0)?;
    let mut max = min;
    let mut points = Vec::with_capacity(timestamps.len());

    for (i, secs) in timestamps.iter().enumerate() {
        let epoch_millis = secs
            .checked_mul(1000)
            .ok_or_else(|| malformed(format!("timestamp {secs} out of range")))?;
        let value = rounded(i)?;
        min = min.min(value);
        max = max.max(value);
        points.push(ChartPoint {
            epoch_millis,
            value,
        });
    }

    Ok((points, min, max))
}

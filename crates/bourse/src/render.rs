use bourse_warehouse::{ChartPoint, Extraction, Price, Result, StockOverview, Tone};
use chrono::DateTime;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const SPARK_WIDTH: usize = 64;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn tinted(text: String, tone: Tone) -> ColoredString {
    match tone {
        Tone::Gain => text.green(),
        Tone::Loss => text.red(),
    }
}

fn date(epoch_millis: i64) -> String {
    DateTime::from_timestamp(epoch_millis.div_euclid(1000), 0)
        .map(|time| time.date_naive().to_string())
        .unwrap_or_else(|| epoch_millis.to_string())
}

/// Text panel for one extraction: header, headline stats, sparkline, extrema & summary.
pub fn panel(extraction: &Extraction, with_points: bool) -> String {
    let mut out = String::new();

    // writing to a String cannot fail
    match (extraction.window_start(), extraction.window_end()) {
        (Some(start), Some(end)) => {
            let _ = writeln!(
                out,
                "{}  {} ({} to {}, {} points)",
                extraction.symbol.as_str().bold(),
                extraction.range.label(),
                date(start),
                date(end),
                extraction.len(),
            );
        }
        _ => {
            let _ = writeln!(
                out,
                "{}  {} (no points)",
                extraction.symbol.as_str().bold(),
                extraction.range.label(),
            );
        }
    }
    let _ = writeln!(
        out,
        "Book value ${}    Profit {}",
        extraction.book_value,
        tinted(format!("{}%", extraction.profit), extraction.tone()),
    );
    if !extraction.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            sparkline(&extraction.points, extraction.min, extraction.max, SPARK_WIDTH)
        );
        let _ = writeln!(
            out,
            "Low value in the selected period of time = ${}",
            extraction.min
        );
        let _ = writeln!(
            out,
            "Peak value in the selected period of time = ${}",
            extraction.max
        );
    }

    if !extraction.summary.is_empty() {
        let _ = writeln!(out, "\n{}", extraction.summary);
    }

    if with_points {
        out.push('\n');
        for point in &extraction.points {
            let _ = writeln!(out, "{}  ${}", date(point.epoch_millis), point.value);
        }
    }

    out
}

/// One row per watchlist symbol: `$book value` & `profit%`, coloured by sign.
pub fn overview(rows: &[Result<StockOverview>]) -> String {
    let mut out = String::new();
    for row in rows {
        match row {
            Ok(stock) => {
                let _ = writeln!(
                    out,
                    "{:<6} {:>12} {:>10}",
                    stock.symbol.as_str(),
                    format!("${:.2}", stock.book_value),
                    tinted(format!("{:.2}%", stock.profit), stock.tone()),
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{}", format!("unavailable: {e}").dimmed());
            }
        }
    }
    out
}

/// Squeeze `points` into at most `width` columns, one block glyph each.
///
/// Each column shows the last price that falls in it, scaled between `min` & `max`.
pub fn sparkline(points: &[ChartPoint], min: Price, max: Price, width: usize) -> String {
    if points.is_empty() || width == 0 {
        return String::new();
    }

    let columns = points.len().min(width);
    // i128: the gap between two extreme i64 cent amounts overflows i64
    let spread = (i128::from(max.cents()) - i128::from(min.cents())) as f64;
    (0..columns)
        .map(|column| {
            let last = ((column + 1) * points.len()) / columns - 1;
            let value = points[last].value.cents();
            if spread <= 0.0 {
                return SPARKS[SPARKS.len() / 2];
            }
            let ratio = (i128::from(value) - i128::from(min.cents())) as f64 / spread;
            let level = (ratio * (SPARKS.len() - 1) as f64).round();
            SPARKS[(level as usize).min(SPARKS.len() - 1)]
        })
        .collect()
}

use crate::render;
use anyhow::Result;
use bourse_warehouse::{Dashboard, RangeKey, Symbol, Watchlist};
use dialoguer::{theme::ColorfulTheme, FuzzySelect};
use std::fmt;
use tracing::{debug, warn};

/// What is on screen; the dashboard itself keeps no selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub symbol: Symbol,
    pub range: RangeKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Stock(Symbol),
    Range(RangeKey),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Stock(symbol) => write!(f, "{symbol}"),
            Action::Range(range) => write!(f, "[{}]", range.label()),
            Action::Quit => f.write_str("quit"),
        }
    }
}

impl Selection {
    pub fn start(watchlist: &Watchlist) -> Self {
        Selection {
            symbol: watchlist.first().clone(),
            range: RangeKey::default(),
        }
    }

    /// The selection an action leads to; `None` for quit.
    ///
    /// Picking a stock starts it on the default range; picking a range keeps the stock.
    pub fn apply(&self, action: &Action) -> Option<Selection> {
        match action {
            Action::Stock(symbol) => Some(Selection {
                symbol: symbol.clone(),
                range: RangeKey::default(),
            }),
            Action::Range(range) => Some(Selection {
                symbol: self.symbol.clone(),
                range: *range,
            }),
            Action::Quit => None,
        }
    }
}

/// Menu entries: every watchlist stock, then the range buttons, then quit.
pub fn actions(watchlist: &Watchlist) -> Vec<Action> {
    watchlist
        .symbols()
        .iter()
        .cloned()
        .map(Action::Stock)
        .chain(RangeKey::UI.into_iter().map(Action::Range))
        .chain(std::iter::once(Action::Quit))
        .collect()
}

/// Render `next` if it extracts; otherwise keep `current` on screen.
fn show(
    dashboard: &Dashboard,
    current: Option<Selection>,
    next: Selection,
    points: bool,
) -> Option<Selection> {
    match dashboard.extract(&next.symbol, next.range) {
        Ok(extraction) => {
            println!("{}", render::panel(&extraction, points));
            Some(next)
        }
        Err(e) => {
            warn!("[{}] {} could not be charted: {e}", next.symbol, next.range);
            eprintln!("{} ({}) is unavailable: {e}", next.symbol, next.range.label());
            current
        }
    }
}

pub fn run(dashboard: &Dashboard, watchlist: &Watchlist, points: bool) -> Result<()> {
    let menu = actions(watchlist);
    let mut current = show(dashboard, None, Selection::start(watchlist), points);

    loop {
        let prompt = match &current {
            Some(selection) => format!("{} · {}", selection.symbol, selection.range.label()),
            None => "Pick a stock".to_string(),
        };
        let picked = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(0)
            .items(&menu)
            .interact_opt()?;

        let Some(action) = picked.map(|i| &menu[i]) else {
            break;
        };
        debug!("Browse action: {action}");

        // a range needs a stock on screen to apply to
        let base = current
            .clone()
            .unwrap_or_else(|| Selection::start(watchlist));
        match base.apply(action) {
            Some(next) => current = show(dashboard, current, next, points),
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist() -> Watchlist {
        Watchlist::parse("TSLA,AAPL").unwrap()
    }

    #[test]
    fn starts_on_first_stock_over_five_years() {
        let selection = Selection::start(&watchlist());
        assert_eq!(selection.symbol.as_str(), "TSLA");
        assert_eq!(selection.range, RangeKey::FiveYears);
    }

    #[test]
    fn range_keeps_stock_and_stock_resets_range() {
        let start = Selection::start(&watchlist());

        let month = start.apply(&Action::Range(RangeKey::OneMonth)).unwrap();
        assert_eq!(month.symbol.as_str(), "TSLA");
        assert_eq!(month.range, RangeKey::OneMonth);

        let aapl = month.apply(&Action::Stock("AAPL".parse().unwrap())).unwrap();
        assert_eq!(aapl.symbol.as_str(), "AAPL");
        assert_eq!(aapl.range, RangeKey::FiveYears);

        assert_eq!(aapl.apply(&Action::Quit), None);
    }

    #[test]
    fn menu_lists_stocks_ranges_then_quit() {
        let menu = actions(&watchlist());
        let labels: Vec<String> = menu.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            [
                "TSLA",
                "AAPL",
                "[1 month]",
                "[3 months]",
                "[1 year]",
                "[5 years]",
                "quit"
            ]
        );
    }
}

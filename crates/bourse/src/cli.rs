use bourse_warehouse::{RangeKey, Symbol};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, default_value = "INFO", ignore_case = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chart a single stock over one of the history ranges.
    Show {
        symbol: Symbol,

        /// History range: 1mo, 3mo, 6mo, 1y or 5y.
        #[arg(short, long, default_value = "5y")]
        range: RangeKey,

        /// Print the extraction as JSON instead of the text panel.
        #[arg(long)]
        json: bool,

        /// List every dated price under the panel.
        #[arg(long)]
        points: bool,
    },

    /// Book value & profit for every stock on the watchlist.
    List,

    /// Pick stocks & ranges interactively.
    Browse {
        /// List every dated price under the panel.
        #[arg(long)]
        points: bool,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_defaults_to_five_years() {
        let cli = Cli::parse_from(["bourse", "show", "aapl"]);
        match cli.command {
            Commands::Show {
                symbol,
                range,
                json,
                points,
            } => {
                assert_eq!(symbol.as_str(), "AAPL");
                assert_eq!(range, RangeKey::FiveYears);
                assert!(!json && !points);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.trace, TraceLevel::INFO);
    }

    #[test]
    fn show_parses_range_and_flags() {
        let cli = Cli::parse_from([
            "bourse", "--trace", "DEBUG", "show", "MSFT", "--range", "3mo", "--json",
        ]);
        assert_eq!(cli.trace, TraceLevel::DEBUG);
        assert!(matches!(
            cli.command,
            Commands::Show {
                range: RangeKey::ThreeMonths,
                json: true,
                ..
            }
        ));
    }

    #[test]
    fn unknown_range_is_rejected() {
        assert!(Cli::try_parse_from(["bourse", "show", "MSFT", "-r", "2w"]).is_err());
    }
}

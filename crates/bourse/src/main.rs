use anyhow::{anyhow, Result};
use bourse_warehouse::{Config, Dashboard};
use clap::Parser;
use cli::{Cli, Commands::*, TraceLevel};
use dotenv::dotenv;
use tracing::{debug, error, info, subscriber, trace, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod browse;
mod cli;
mod render;
mod ui;

const FETCH_FAILURE: &str = "Failed to load stock data. Please try again later.";

fn preprocess(trace_level: Level) -> Result<()> {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

/// Log the cause of a failed fetch; the user only sees [`FETCH_FAILURE`].
fn user_facing<T>(fetched: bourse_warehouse::Result<T>) -> Result<T> {
    fetched.map_err(|e| {
        error!("Error fetching data: {e}");
        anyhow!(FETCH_FAILURE)
    })
}

/// Fetch every payload up front; nothing renders unless all three arrive.
async fn load(config: &Config) -> Result<Dashboard> {
    let http_client = bourse_util::build_client(config.user_agent.as_deref(), config.timeout)?;
    let spinner = ui::fetch_spinner("Fetching stock data ...")?;
    let fetched = Dashboard::fetch(&http_client, &config.endpoints).await;
    spinner.finish_and_clear();

    user_facing(fetched)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level)?;
    trace!("Command line input recorded: {cli:#?}");

    let config = Config::from_env()?;
    debug!("Configuration loaded: {config:?}");

    // cli framework:
    // "> bourse <COMMAND>"
    match &cli.command {
        // "> bourse show AAPL --range 1y"
        Show {
            symbol,
            range,
            json,
            points,
        } => {
            if !config.watchlist.contains(symbol) {
                warn!("{symbol} is not on the watchlist; charting it anyway");
            }
            let dashboard = load(&config).await?;
            let extraction = dashboard.extract(symbol, *range)?;
            info!("[{symbol}] {range} extracted: {} points", extraction.len());

            if *json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                print!("{}", render::panel(&extraction, *points));
            }
        }

        // "> bourse list"
        List => {
            let dashboard = load(&config).await?;
            print!("{}", render::overview(&dashboard.overview(&config.watchlist)));
        }

        // "> bourse browse"
        Browse { points } => {
            let dashboard = load(&config).await?;
            print!("{}", render::overview(&dashboard.overview(&config.watchlist)));
            browse::run(&dashboard, &config.watchlist, *points)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bourse_warehouse::Error;

    #[test]
    fn any_fetch_failure_shows_one_message() {
        let failures = [
            Error::Fetch {
                endpoint: "stock stats".to_string(),
                source: anyhow!("responded with status 500"),
            },
            Error::MalformedPayload("stocksData is empty".to_string()),
        ];
        for failure in failures {
            let err = user_facing::<()>(Err(failure)).unwrap_err();
            assert_eq!(err.to_string(), FETCH_FAILURE);
            assert!(err.source().is_none());
        }
    }

    #[test]
    fn successful_fetch_passes_through() {
        assert_eq!(user_facing(Ok(3)).unwrap(), 3);
    }
}

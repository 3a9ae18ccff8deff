use crate::error::{Error, Result};
use crate::fetch::Endpoints;
use crate::schema::Watchlist;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://stocksapi-uhe1.onrender.com/api/stocks";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the environment (and `.env`):
///
/// | variable              | default                  |
/// |-----------------------|--------------------------|
/// | `BOURSE_API_URL`      | [`DEFAULT_API_URL`]      |
/// | `BOURSE_SYMBOLS`      | the ten default tickers  |
/// | `BOURSE_TIMEOUT_SECS` | 30; `0` disables it      |
/// | `USER_AGENT`          | reqwest's own            |
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub watchlist: Watchlist,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| dotenv::var(key).ok())
    }

    /// Build from any variable source; `var` yields `None` for unset keys.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let base = set("BOURSE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let endpoints = Endpoints::from_base(&base);

        let watchlist = match set("BOURSE_SYMBOLS") {
            Some(list) => Watchlist::parse(&list)?,
            None => Watchlist::default(),
        };

        let timeout_secs = match set("BOURSE_TIMEOUT_SECS") {
            Some(secs) => secs.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!(
                    "BOURSE_TIMEOUT_SECS=\"{secs}\" is not a number of seconds: {e}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Config {
            endpoints,
            watchlist,
            timeout,
            user_agent: set("USER_AGENT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.endpoints, Endpoints::from_base(DEFAULT_API_URL));
        assert_eq!(config.watchlist, Watchlist::default());
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("BOURSE_API_URL", "http://127.0.0.1:9000/api"),
            ("BOURSE_SYMBOLS", "nvda,amd"),
            ("BOURSE_TIMEOUT_SECS", "0"),
            ("USER_AGENT", "bourse admin@example.com"),
        ])
        .unwrap();
        assert_eq!(
            config.endpoints.stats,
            "http://127.0.0.1:9000/api/getstockstatsdata"
        );
        assert_eq!(config.watchlist.symbols().len(), 2);
        assert_eq!(config.watchlist.first().as_str(), "NVDA");
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent.as_deref(), Some("bourse admin@example.com"));
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        assert!(matches!(
            config(&[("BOURSE_TIMEOUT_SECS", "soon")]),
            Err(Error::Config(_))
        ));
    }
}

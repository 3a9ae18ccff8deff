use crate::error::{Error, Result};
use crate::extract::{self, Extraction, StockOverview};
use crate::schema::{ChartsPayload, ProfilePayload, RangeKey, StatsPayload, Symbol, Watchlist};
use bourse_util::Http;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};

/// URLs of the three stocks API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub charts: String,
    pub stats: String,
    pub profiles: String,
}

impl Endpoints {
    /// Endpoints under a common base, e.g. `https://host/api/stocks`.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Endpoints {
            charts: format!("{base}/getstocksdata"),
            stats: format!("{base}/getstockstatsdata"),
            profiles: format!("{base}/getstocksprofiledata"),
        }
    }
}

/// Everything the dashboard renders from, fetched once up front.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub charts: ChartsPayload,
    pub stats: StatsPayload,
    pub profiles: ProfilePayload,
}

impl Dashboard {
    /// Fetch the three payloads concurrently.
    ///
    /// The first request to fail (transport, non-success status or bad JSON)
    /// aborts the rest; there are no retries.
    pub async fn fetch(client: &Client, endpoints: &Endpoints) -> Result<Self> {
        let time = std::time::Instant::now();
        debug!("Fetching stocks data, stats & profiles");

        let (charts, stats, profiles) = futures::try_join!(
            fetch_payload::<ChartsPayload>(client, "stocks data", &endpoints.charts),
            fetch_payload::<StatsPayload>(client, "stock stats", &endpoints.stats),
            fetch_payload::<ProfilePayload>(client, "stock profiles", &endpoints.profiles),
        )?;

        debug!(
            "Dashboard payloads fetched. Elapsed time: {} ms",
            time.elapsed().as_millis()
        );
        Ok(Dashboard {
            charts,
            stats,
            profiles,
        })
    }

    /// See [`extract::extract`].
    pub fn extract(&self, symbol: &Symbol, range: RangeKey) -> Result<Extraction> {
        trace!("Extracting [{symbol}] {range}");
        extract::extract(&self.charts, &self.stats, &self.profiles, symbol, range)
    }

    /// Headline stats for each watchlist symbol, in watchlist order.
    pub fn overview(&self, watchlist: &Watchlist) -> Vec<Result<StockOverview>> {
        watchlist
            .symbols()
            .iter()
            .map(|symbol| extract::overview(&self.stats, symbol))
            .collect()
    }
}

async fn fetch_payload<T>(client: &Client, endpoint: &str, url: &str) -> Result<T>
where
    T: DeserializeOwned + Send,
{
    trace!("Fetching {endpoint} from {url}");
    client.get_json::<T>(url).await.map_err(|e| {
        error!("{endpoint} fetching error: {e:#}");
        Error::Fetch {
            endpoint: endpoint.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_share_the_base() {
        let endpoints = Endpoints::from_base("http://localhost:1234/api/stocks/");
        assert_eq!(endpoints.charts, "http://localhost:1234/api/stocks/getstocksdata");
        assert_eq!(endpoints.stats, "http://localhost:1234/api/stocks/getstockstatsdata");
        assert_eq!(
            endpoints.profiles,
            "http://localhost:1234/api/stocks/getstocksprofiledata"
        );
    }
}

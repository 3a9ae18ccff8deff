pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod schema;

pub use config::Config;
pub use error::{Error, Result};
pub use extract::{extract, overview, Extraction, StockOverview, Tone};
pub use fetch::{Dashboard, Endpoints};
pub use schema::{ChartPoint, Price, RangeKey, Symbol, Watchlist};

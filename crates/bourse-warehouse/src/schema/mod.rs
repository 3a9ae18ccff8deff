pub mod payload;
pub mod price;
pub mod symbol;

pub use payload::{ChartsPayload, ProfilePayload, Series, StatsPayload, StockProfile, StockStats};
pub use price::{ChartPoint, Price};
pub use symbol::{RangeKey, Symbol, Watchlist};

// Creator data — backend payload models and the lenient decoders behind them.

pub mod lenient;
pub mod models;

pub use models::{CreatorRecord, Location, PlatformMetrics, Verification};

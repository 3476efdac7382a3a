//! Shared data models spanning the engine layers.

pub mod coin;
pub mod entity;
pub mod filter;
pub mod lenient;
pub mod period;
pub mod query;

pub use coin::{CoinMention, TimeframeMentions, TrendingBuckets, TrendingCoin};
pub use entity::{NestedStats, NormalizedEntity, Platform, RawEntity, ScoredEntity};
pub use filter::{Band, BandThresholds, FilterState, FilterThresholds, RatingFloor};
pub use period::{PeriodSelection, Quarter, Timeframe, YearSelection, ALL_YEARS_KEY};
pub use query::BundleQuery;

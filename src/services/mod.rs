//! External collaborators: the listing source and its session cache.

pub mod cache;
pub mod source;

pub use cache::{CacheEntry, PlatformCache};
pub use source::{parse_listing, parse_trending, HttpInfluencerSource, InfluencerSource};

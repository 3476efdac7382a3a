//! Trending coin models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::lenient;
use super::period::Timeframe;

/// One coin's mention statistics inside a single timeframe bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinMention {
    #[serde(deserialize_with = "lenient::de_text_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::de_count")]
    pub total_mentions: u64,
}

impl CoinMention {
    pub fn new(symbol: impl Into<String>, total_mentions: u64) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            total_mentions,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Mention lists keyed by timeframe, iterated shortest timeframe first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingBuckets {
    buckets: BTreeMap<Timeframe, Vec<CoinMention>>,
}

impl TrendingBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, timeframe: Timeframe, mentions: Vec<CoinMention>) -> Self {
        self.buckets.insert(timeframe, mentions);
        self
    }

    /// Build from a backend object `{ "<timeframe key>": [mention, ...] }`.
    ///
    /// Unknown timeframe keys, non-array buckets and malformed mentions are
    /// skipped.
    pub fn from_value(value: Value) -> Self {
        let mut buckets = BTreeMap::new();
        let Value::Object(map) = value else {
            return Self { buckets };
        };

        for (key, bucket) in map {
            let Some(timeframe) = Timeframe::from_key(&key) else {
                debug!(key = %key, "TrendingBuckets: skipping unknown timeframe bucket");
                continue;
            };
            let Value::Array(items) = bucket else {
                continue;
            };
            let mentions: Vec<CoinMention> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            buckets.insert(timeframe, mentions);
        }

        Self { buckets }
    }

    /// Timeframes present, in increasing duration.
    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> + '_ {
        self.buckets.keys().copied()
    }

    pub fn bucket(&self, timeframe: Timeframe) -> &[CoinMention] {
        self.buckets
            .get(&timeframe)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}

/// Mention count of one coin in one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeframeMentions {
    pub timeframe: Timeframe,
    pub mentions: u64,
}

/// One row of the merged trending-coins leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingCoin {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One entry per bucket, shortest timeframe first.
    pub mentions: Vec<TimeframeMentions>,
    pub rank: usize,
}

impl TrendingCoin {
    pub fn mentions_in(&self, timeframe: Timeframe) -> u64 {
        self.mentions
            .iter()
            .find(|m| m.timeframe == timeframe)
            .map(|m| m.mentions)
            .unwrap_or(0)
    }
}

//! Influencer entity models: raw backend records and their derived views.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::lenient;

/// Source platform of a tracked channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Telegram,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::YouTube, Platform::Telegram];

    pub fn key(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Telegram => "telegram",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Nested statistic map kept as raw JSON and read through a path lens.
///
/// Absence or a wrong type at any level reads as `None`; callers apply the
/// field default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedStats(pub Value);

impl NestedStats {
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |node, key| node.get(*key))
    }

    pub fn number_at(&self, path: &[&str]) -> Option<f64> {
        self.get(path).and_then(lenient::finite_number)
    }

    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}

impl From<Value> for NestedStats {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One influencer record as delivered by the backend listing.
///
/// Field layout differs per platform; every field is optional and unknown
/// fields are retained in `extra` so the detail view shows the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntity {
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient::de_number", skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<f64>,
    #[serde(deserialize_with = "lenient::de_number", skip_serializing_if = "Option::is_none")]
    pub subs: Option<f64>,
    #[serde(deserialize_with = "lenient::de_number", skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<f64>,
    #[serde(deserialize_with = "lenient::de_number", skip_serializing_if = "Option::is_none")]
    pub member_count: Option<f64>,
    #[serde(deserialize_with = "lenient::de_text", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub rating_by_year_by_timeframe: NestedStats,
    pub score_by_year_by_timeframe: NestedStats,
    pub post_count_by_year: NestedStats,
    #[serde(deserialize_with = "lenient::de_number", skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<f64>,
    pub summary_by_period: NestedStats,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical view of one raw record. Borrows the record so metrics can be
/// re-selected for another period without re-fetching.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedEntity<'a> {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub subscriber_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip)]
    pub raw: &'a RawEntity,
}

/// Normalized entity with the metrics of the current period and its rank.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredEntity<'a> {
    #[serde(flatten)]
    pub entity: NormalizedEntity<'a>,
    pub rating: f64,
    pub final_score: f64,
    pub roi: f64,
    pub win_rate: f64,
    pub post_count: u64,
    /// 1-based; zero until the ranker has run.
    pub rank: usize,
}

impl<'a> ScoredEntity<'a> {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }
}

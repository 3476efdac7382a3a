//! Backend bundle query parameters

use serde::{Deserialize, Serialize};

/// Query parameters forwarded verbatim to the backend listing endpoints.
///
/// They select which pre-aggregated bundle the backend returns; the
/// client-side filter stages run on top of whatever comes back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

impl BundleQuery {
    /// Non-empty parameters as `(name, value)` pairs in a fixed order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("sentiment", &self.sentiment),
            ("timeframe", &self.timeframe),
            ("type", &self.call_type),
            ("year", &self.year),
            ("quarter", &self.quarter),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        })
        .collect()
    }
}

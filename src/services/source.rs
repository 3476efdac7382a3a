//! Listing source: the data-fetch collaborator behind the leaderboard.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::models::coin::TrendingBuckets;
use crate::models::entity::{Platform, RawEntity};
use crate::models::query::BundleQuery;

#[async_trait]
pub trait InfluencerSource: Send + Sync {
    /// Fetch the raw influencer listing of one platform.
    async fn fetch_influencers(
        &self,
        platform: Platform,
        query: &BundleQuery,
    ) -> Result<Vec<RawEntity>, Box<dyn std::error::Error + Send + Sync>>;

    /// Fetch per-timeframe coin mention buckets.
    async fn fetch_trending_coins(
        &self,
        query: &BundleQuery,
    ) -> Result<TrendingBuckets, Box<dyn std::error::Error + Send + Sync>>;
}

/// `results` of a `{ success, results }` envelope, or `Null` when the
/// envelope does not report success.
fn envelope_results(body: Value) -> Value {
    let Value::Object(mut envelope) = body else {
        return Value::Null;
    };
    if envelope.get("success") != Some(&Value::Bool(true)) {
        return Value::Null;
    }
    envelope.remove("results").unwrap_or(Value::Null)
}

/// Decode a listing envelope. Anything other than `success: true` with an
/// array of results reads as an empty list; records that do not decode are
/// skipped.
pub fn parse_listing(body: Value) -> Vec<RawEntity> {
    let Value::Array(items) = envelope_results(body) else {
        return Vec::new();
    };

    let total = items.len();
    let entities: Vec<RawEntity> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawEntity>(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(error = %e, "Skipping malformed influencer record");
                None
            }
        })
        .collect();

    if entities.len() < total {
        debug!(total, decoded = entities.len(), "Listing contained malformed records");
    }
    entities
}

/// Decode a trending-coins envelope whose results map timeframe keys to
/// mention lists.
pub fn parse_trending(body: Value) -> TrendingBuckets {
    TrendingBuckets::from_value(envelope_results(body))
}

/// HTTP listing source against the backend API.
pub struct HttpInfluencerSource {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpInfluencerSource {
    pub fn new(base_url: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(
        base_url: &str,
        client: reqwest::Client,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // A trailing slash keeps any base path when joining endpoint paths.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| format!("Invalid backend URL '{}': {}", base_url, e))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Listing endpoint for one platform.
    pub fn influencers_url(&self, platform: Platform) -> Result<Url, url::ParseError> {
        self.base_url
            .join(&format!("api/{}/influencers", platform.key()))
    }

    pub fn trending_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join("api/coins/trending")
    }

    async fn get_json(
        &self,
        url: Url,
        query: &BundleQuery,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        debug!(url = %url, query = ?query, "Fetching from backend");
        let body = self
            .client
            .get(url)
            .query(&query.to_pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl InfluencerSource for HttpInfluencerSource {
    async fn fetch_influencers(
        &self,
        platform: Platform,
        query: &BundleQuery,
    ) -> Result<Vec<RawEntity>, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.influencers_url(platform)?;
        let body = self.get_json(url, query).await?;
        Ok(parse_listing(body))
    }

    async fn fetch_trending_coins(
        &self,
        query: &BundleQuery,
    ) -> Result<TrendingBuckets, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.trending_url()?;
        let body = self.get_json(url, query).await?;
        Ok(parse_trending(body))
    }
}

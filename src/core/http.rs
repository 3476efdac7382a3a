//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::{self, LeaderboardConfig};
use crate::leaderboard::engine::{LeaderboardEngine, LeaderboardPage};
use crate::leaderboard::period::{
    quarter_options_for, timeframe_options_for, today, validate_timeframe, year_options,
};
use crate::leaderboard::selection::Selection;
use crate::leaderboard::trending::merge_trending;
use crate::metrics::Metrics;
use crate::models::entity::Platform;
use crate::models::filter::{Band, RatingFloor};
use crate::models::period::{PeriodSelection, Quarter, Timeframe, YearSelection};
use crate::models::query::BundleQuery;
use crate::services::cache::PlatformCache;
use crate::services::source::{HttpInfluencerSource, InfluencerSource};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub source: Arc<dyn InfluencerSource>,
    pub cache: Arc<PlatformCache>,
    pub engine: Arc<LeaderboardEngine>,
    pub config: Arc<LeaderboardConfig>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn InfluencerSource>,
        metrics: Arc<Metrics>,
        config: LeaderboardConfig,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            start_time: Arc::new(Instant::now()),
            cache: Arc::new(PlatformCache::new().with_metrics(metrics.clone())),
            engine: Arc::new(LeaderboardEngine::new(config.thresholds)),
            config: Arc::new(config),
            metrics,
            source,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "influrank-leaderboard"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Raw leaderboard query. Everything is parsed leniently so a bad value
/// falls back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub year: Option<String>,
    pub timeframe: Option<String>,
    pub quarter: Option<String>,
    pub sentiment: Option<String>,
    #[serde(rename = "type")]
    pub call_type: Option<String>,
    pub rating: Option<String>,
    pub roi: Option<String>,
    pub win_rate: Option<String>,
    pub volume: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// Replay the query as user interactions on a fresh selection.
///
/// Returns the selection and whether the requested timeframe had to be
/// replaced by the default.
pub fn selection_from_query(
    platform: Platform,
    params: &LeaderboardQuery,
    today: NaiveDate,
) -> (Selection, bool) {
    let mut selection = Selection::new(platform);
    let mut fell_back = false;

    if let Some(year) = params.year.as_deref() {
        fell_back |= selection
            .set_year(YearSelection::parse(year), today)
            .fell_back();
    }
    if let Some(key) = params.timeframe.as_deref() {
        match Timeframe::from_key(key) {
            Some(timeframe) => fell_back |= selection.set_timeframe(timeframe, today).fell_back(),
            None => fell_back = true,
        }
    }
    if let Some(quarter) = params.quarter.as_deref() {
        selection.set_quarter(Quarter::from_key(quarter), today);
    }
    selection.set_sentiment(non_empty(params.sentiment.as_deref()));
    selection.set_call_type(non_empty(params.call_type.as_deref()));

    if let Some(rating) = params.rating.as_deref() {
        selection.set_rating_floor(RatingFloor::parse(rating));
    }
    if let Some(roi) = params.roi.as_deref() {
        selection.set_roi_band(Band::parse(roi));
    }
    if let Some(win_rate) = params.win_rate.as_deref() {
        selection.set_win_rate_band(Band::parse(win_rate));
    }
    if let Some(volume) = params.volume.as_deref() {
        selection.set_volume_band(Band::parse(volume));
    }
    if let Some(search) = params.search.as_deref() {
        selection.set_search_text(search);
    }

    selection.set_page(parse_positive(params.page.as_deref()).unwrap_or(1));
    (selection, fell_back)
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse<'a> {
    error: bool,
    timeframe_fell_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    quarter: Option<Quarter>,
    /// Bundle the cached listing was fetched with, which can differ from
    /// the current selection until the platform is reloaded.
    bundle: &'a BundleQuery,
    #[serde(flatten)]
    leaderboard: LeaderboardPage<'a>,
}

fn parse_platform(platform: &str) -> Result<Platform, StatusCode> {
    Platform::parse(platform).ok_or(StatusCode::NOT_FOUND)
}

fn to_json<T: Serialize>(value: &T) -> Result<Json<Value>, StatusCode> {
    serde_json::to_value(value).map(Json).map_err(|e| {
        error!(error = %e, "Failed to serialize response");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Ranked, filtered and paginated leaderboard for one platform
async fn get_leaderboard(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Value>, StatusCode> {
    let platform = parse_platform(&platform)?;
    let (selection, timeframe_fell_back) = selection_from_query(platform, &params, today());
    let page_size =
        parse_positive(params.page_size.as_deref()).unwrap_or(state.config.page_size);

    let entry = state
        .cache
        .ensure_loaded(state.source.as_ref(), platform, &selection.bundle_query())
        .await;

    let leaderboard = state.engine.compute(
        &entry.data,
        platform,
        &selection.period,
        &selection.filters,
        selection.page,
        page_size,
    );

    to_json(&LeaderboardResponse {
        error: entry.error,
        timeframe_fell_back,
        quarter: selection.quarter,
        bundle: &entry.query,
        leaderboard,
    })
}

/// Drop the cached listing of a platform and fetch it again
async fn reload_platform(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let platform = parse_platform(&platform)?;
    state.cache.invalidate(platform).await;
    let selection = Selection::new(platform);
    let entry = state
        .cache
        .ensure_loaded(state.source.as_ref(), platform, &selection.bundle_query())
        .await;

    info!(platform = %platform, error = entry.error, "Platform listing reloaded");
    Ok(Json(json!({
        "platform": platform,
        "count": entry.data.len(),
        "error": entry.error
    })))
}

#[derive(Debug, Default, Deserialize)]
struct PeriodQuery {
    year: Option<String>,
    timeframe: Option<String>,
}

impl PeriodQuery {
    fn period(&self, today: NaiveDate) -> PeriodSelection {
        let year = YearSelection::parse(self.year.as_deref().unwrap_or_default());
        let requested = self
            .timeframe
            .as_deref()
            .and_then(Timeframe::from_key)
            .unwrap_or_default();
        let timeframe = validate_timeframe(&year, requested, today).timeframe();
        PeriodSelection::new(year, timeframe)
    }
}

/// Full record of one influencer, served from the cached listing
async fn get_influencer(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Value>, StatusCode> {
    let platform = parse_platform(&platform)?;
    let period = params.period(today());
    let selection = Selection::new(platform);
    let entry = state
        .cache
        .ensure_loaded(state.source.as_ref(), platform, &selection.bundle_query())
        .await;

    let detail = state
        .engine
        .detail(&entry.data, platform, &id, &period)
        .ok_or(StatusCode::NOT_FOUND)?;
    to_json(&detail)
}

/// Year, timeframe and quarter options for the period pickers
async fn get_periods(
    State(state): State<AppState>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Value>, StatusCode> {
    let today = today();
    let year = YearSelection::parse(params.year.as_deref().unwrap_or_default());
    let timeframes: Vec<Value> = timeframe_options_for(&year, today)
        .into_iter()
        .map(|tf| json!({ "key": tf.key(), "label": tf.label() }))
        .collect();

    Ok(Json(json!({
        "year": year,
        "years": year_options(today, state.config.first_tracked_year),
        "timeframes": timeframes,
        "default_timeframe": Timeframe::DEFAULT,
        "quarters": quarter_options_for(&year, today),
    })))
}

/// Trending coins merged across timeframe buckets
async fn get_trending_coins(
    State(state): State<AppState>,
    Query(query): Query<BundleQuery>,
) -> Result<Json<Value>, StatusCode> {
    state
        .metrics
        .source_fetches_total
        .with_label_values(&["coins"])
        .inc();

    match state.source.fetch_trending_coins(&query).await {
        Ok(buckets) => {
            let coins = merge_trending(&buckets, state.config.trending_top_k);
            Ok(Json(json!({ "error": false, "coins": coins })))
        }
        Err(e) => {
            warn!(error = %e, "Trending coins fetch failed");
            state
                .metrics
                .source_fetch_failures_total
                .with_label_values(&["coins"])
                .inc();
            Ok(Json(json!({ "error": true, "coins": [] })))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/periods", get(get_periods))
        .route("/api/leaderboard/{platform}", get(get_leaderboard))
        .route("/api/leaderboard/{platform}/reload", post(reload_platform))
        .route("/api/influencers/{platform}/{id}", get(get_influencer))
        .route("/api/coins/trending", get(get_trending_coins))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let backend_url = config::get_backend_url();
    let source = HttpInfluencerSource::new(&backend_url)
        .map_err(|e| format!("Failed to configure backend source: {}", e))?;
    let leaderboard_config = LeaderboardConfig::from_env();

    info!(
        backend = %backend_url,
        page_size = leaderboard_config.page_size,
        "Leaderboard backend configured"
    );

    let state = AppState::new(Arc::new(source), metrics, leaderboard_config);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}

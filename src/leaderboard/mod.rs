//! Leaderboard engine: period resolution, metric selection, filtering,
//! ranking and pagination.

pub mod engine;
pub mod filters;
pub mod format;
pub mod normalizer;
pub mod pagination;
pub mod period;
pub mod ranking;
pub mod selection;
pub mod selector;
pub mod trending;

pub use engine::{InfluencerDetail, LeaderboardEngine, LeaderboardPage};
pub use filters::{apply_filters, FilterPipeline, FilterStage};
pub use format::{bar_width_pct, format_count, format_rating, format_roi, format_win_rate};
pub use normalizer::normalize;
pub use pagination::{paginate, Page};
pub use period::{
    quarter_options_for, resolve_timeframe_key, resolve_year_key, timeframe_options_for,
    validate_quarter, validate_timeframe, year_options, TimeframeResolution,
};
pub use ranking::rank;
pub use selection::Selection;
pub use selector::{select_metrics, MetricField, PeriodMetrics};
pub use trending::{merge_trending, DEFAULT_TOP_K};

//! Metric selection for one period.
//!
//! Every nested read goes through [`read_stat`] with the field's entry in the
//! default table, so callers always receive a finite number.

use serde::Serialize;

use super::period::{resolve_timeframe_key, resolve_year_key};
use crate::models::entity::{NormalizedEntity, RawEntity, ScoredEntity};
use crate::models::period::{PeriodSelection, YearSelection};

/// Summary key used when all years are selected.
pub const OVERALL_SUMMARY_KEY: &str = "overall";

/// Per-period statistic fields and their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Rating,
    FinalScore,
    Roi,
    WinRate,
}

impl MetricField {
    /// Leaf key inside a `[year][timeframe]` bucket.
    pub fn leaf_key(&self) -> &'static str {
        match self {
            Self::Rating => "currentRating",
            Self::FinalScore => "finalScore",
            Self::Roi => "probWeightedReturns",
            Self::WinRate => "winPercentage",
        }
    }

    pub fn default_value(&self) -> f64 {
        match self {
            Self::Rating => 0.0,
            Self::FinalScore => 0.0,
            Self::Roi => 0.0,
            Self::WinRate => 0.0,
        }
    }
}

/// Metrics of one entity for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PeriodMetrics {
    pub rating: f64,
    pub final_score: f64,
    pub roi: f64,
    pub win_rate: f64,
    pub post_count: u64,
}

/// Read one statistic for `period` from the map that holds `field`.
pub fn read_stat(raw: &RawEntity, period: &PeriodSelection, field: MetricField) -> f64 {
    let stats = match field {
        MetricField::Rating => &raw.rating_by_year_by_timeframe,
        MetricField::FinalScore | MetricField::Roi | MetricField::WinRate => {
            &raw.score_by_year_by_timeframe
        }
    };
    let path = [
        resolve_year_key(&period.year),
        resolve_timeframe_key(period.timeframe),
        field.leaf_key(),
    ];
    stats
        .number_at(&path)
        .unwrap_or_else(|| field.default_value())
}

/// Posts in the selected year, or the all-time total for all years.
pub fn post_count_for(raw: &RawEntity, year: &YearSelection) -> u64 {
    let count = match year {
        YearSelection::All => raw.total_posts,
        YearSelection::Year(year) => raw.post_count_by_year.number_at(&[year.as_str()]),
    };
    count
        .filter(|c| *c >= 0.0)
        .map(|c| c.round() as u64)
        .unwrap_or(0)
}

/// Free-text summary for the selected year, empty when absent.
pub fn summary_for<'a>(raw: &'a RawEntity, year: &YearSelection) -> &'a str {
    let key = match year {
        YearSelection::All => OVERALL_SUMMARY_KEY,
        YearSelection::Year(year) => year.as_str(),
    };
    raw.summary_by_period.text_at(&[key]).unwrap_or_default()
}

pub fn select_metrics(entity: &NormalizedEntity<'_>, period: &PeriodSelection) -> PeriodMetrics {
    let raw = entity.raw;
    PeriodMetrics {
        rating: read_stat(raw, period, MetricField::Rating),
        final_score: read_stat(raw, period, MetricField::FinalScore),
        roi: read_stat(raw, period, MetricField::Roi),
        win_rate: read_stat(raw, period, MetricField::WinRate),
        post_count: post_count_for(raw, &period.year),
    }
}

/// Attach period metrics to a normalized entity. The rank stays unset.
pub fn score_entity<'a>(entity: NormalizedEntity<'a>, period: &PeriodSelection) -> ScoredEntity<'a> {
    let metrics = select_metrics(&entity, period);
    ScoredEntity {
        entity,
        rating: metrics.rating,
        final_score: metrics.final_score,
        roi: metrics.roi,
        win_rate: metrics.win_rate,
        post_count: metrics.post_count,
        rank: 0,
    }
}

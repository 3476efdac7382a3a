//! Filter pipeline: fixed-order predicate stages over scored entities.

use tracing::debug;

use crate::models::entity::ScoredEntity;
use crate::models::filter::{Band, BandThresholds, FilterState, FilterThresholds, RatingFloor};
use crate::models::period::PeriodSelection;

/// Pipeline stages in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    YearPresence,
    RatingFloor,
    RoiBand,
    WinRateBand,
    VolumeBand,
    Search,
}

impl FilterStage {
    pub const ORDER: [FilterStage; 6] = [
        FilterStage::YearPresence,
        FilterStage::RatingFloor,
        FilterStage::RoiBand,
        FilterStage::WinRateBand,
        FilterStage::VolumeBand,
        FilterStage::Search,
    ];
}

/// With a specific year selected, only entities rated in that period remain.
pub fn passes_year_presence(entity: &ScoredEntity<'_>, period: &PeriodSelection) -> bool {
    period.year.is_all() || entity.rating > 0.0
}

/// Whole stars only: 3.9 does not reach a floor of 4.
pub fn passes_rating_floor(entity: &ScoredEntity<'_>, floor: RatingFloor) -> bool {
    match floor {
        RatingFloor::All => true,
        RatingFloor::AtLeast(stars) => entity.rating.floor() >= f64::from(stars),
    }
}

pub fn passes_band(value: f64, band: Band, thresholds: &BandThresholds) -> bool {
    band.contains(value, thresholds)
}

/// Normalize search input: trimmed and lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match on display name or identifier.
/// `needle` must already be normalized with [`normalize_query`].
pub fn passes_search(entity: &ScoredEntity<'_>, needle: &str) -> bool {
    needle.is_empty()
        || entity.name().to_lowercase().contains(needle)
        || entity.id().to_lowercase().contains(needle)
}

/// A filter state bound to a period and thresholds.
pub struct FilterPipeline<'s> {
    state: &'s FilterState,
    period: &'s PeriodSelection,
    thresholds: &'s FilterThresholds,
    needle: String,
}

impl<'s> FilterPipeline<'s> {
    pub fn new(
        state: &'s FilterState,
        period: &'s PeriodSelection,
        thresholds: &'s FilterThresholds,
    ) -> Self {
        Self {
            state,
            period,
            thresholds,
            needle: normalize_query(&state.search_text),
        }
    }

    pub fn stage_accepts(&self, stage: FilterStage, entity: &ScoredEntity<'_>) -> bool {
        match stage {
            FilterStage::YearPresence => passes_year_presence(entity, self.period),
            FilterStage::RatingFloor => passes_rating_floor(entity, self.state.rating_floor),
            FilterStage::RoiBand => {
                passes_band(entity.roi, self.state.roi_band, &self.thresholds.roi)
            }
            FilterStage::WinRateBand => passes_band(
                entity.win_rate,
                self.state.win_rate_band,
                &self.thresholds.win_rate,
            ),
            FilterStage::VolumeBand => passes_band(
                entity.post_count as f64,
                self.state.volume_band,
                &self.thresholds.volume,
            ),
            FilterStage::Search => passes_search(entity, &self.needle),
        }
    }

    pub fn accepts(&self, entity: &ScoredEntity<'_>) -> bool {
        FilterStage::ORDER
            .iter()
            .all(|stage| self.stage_accepts(*stage, entity))
    }

    pub fn apply<'a>(&self, entities: Vec<ScoredEntity<'a>>) -> Vec<ScoredEntity<'a>> {
        let before = entities.len();
        let kept: Vec<ScoredEntity<'a>> = entities
            .into_iter()
            .filter(|entity| self.accepts(entity))
            .collect();
        debug!(before, after = kept.len(), "FilterPipeline: applied filters");
        kept
    }
}

pub fn apply_filters<'a>(
    entities: Vec<ScoredEntity<'a>>,
    state: &FilterState,
    period: &PeriodSelection,
    thresholds: &FilterThresholds,
) -> Vec<ScoredEntity<'a>> {
    FilterPipeline::new(state, period, thresholds).apply(entities)
}

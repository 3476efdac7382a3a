//! Leaderboard pipeline: raw list + period + filters -> one ranked page.

use serde::Serialize;
use tracing::debug;

use super::filters::FilterPipeline;
use super::normalizer::{normalize, normalize_all, resolve_identifier};
use super::pagination::{paginate, Page};
use super::ranking::rank;
use super::selector::{score_entity, select_metrics, summary_for, PeriodMetrics};
use crate::models::entity::{NormalizedEntity, Platform, RawEntity, ScoredEntity};
use crate::models::filter::{FilterState, FilterThresholds};
use crate::models::period::PeriodSelection;

/// View-model handed to the rendering side for one recomputation.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardPage<'a> {
    pub platform: Platform,
    pub period: PeriodSelection,
    pub filters: FilterState,
    #[serde(flatten)]
    pub page: Page<ScoredEntity<'a>>,
}

/// Full record of one entity for the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct InfluencerDetail<'a> {
    #[serde(flatten)]
    pub entity: NormalizedEntity<'a>,
    pub period: PeriodSelection,
    pub metrics: PeriodMetrics,
    pub summary: &'a str,
    pub raw: &'a RawEntity,
}

pub struct LeaderboardEngine {
    thresholds: FilterThresholds,
}

impl LeaderboardEngine {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }

    /// Normalize every record and attach the metrics of `period`.
    pub fn score<'a>(
        &self,
        raws: &'a [RawEntity],
        platform: Platform,
        period: &PeriodSelection,
    ) -> Vec<ScoredEntity<'a>> {
        normalize_all(raws, platform)
            .into_iter()
            .map(|entity| score_entity(entity, period))
            .collect()
    }

    /// Score, filter and rank the full list.
    pub fn ranked<'a>(
        &self,
        raws: &'a [RawEntity],
        platform: Platform,
        period: &PeriodSelection,
        filters: &FilterState,
    ) -> Vec<ScoredEntity<'a>> {
        let scored = self.score(raws, platform, period);
        let filtered = FilterPipeline::new(filters, period, &self.thresholds).apply(scored);
        rank(filtered)
    }

    /// The whole pipeline. A list that has not been fetched is simply empty.
    pub fn compute<'a>(
        &self,
        raws: &'a [RawEntity],
        platform: Platform,
        period: &PeriodSelection,
        filters: &FilterState,
        current_page: usize,
        page_size: usize,
    ) -> LeaderboardPage<'a> {
        let ranked = self.ranked(raws, platform, period, filters);
        let page = paginate(&ranked, page_size, current_page);

        debug!(
            platform = %platform,
            year = %period.year,
            timeframe = %period.timeframe,
            input = raws.len(),
            matches = ranked.len(),
            page = current_page,
            total_pages = page.total_pages,
            "LeaderboardEngine: recomputed leaderboard"
        );

        LeaderboardPage {
            platform,
            period: period.clone(),
            filters: filters.clone(),
            page,
        }
    }

    /// Look up one entity by identifier in the already-fetched list.
    pub fn detail<'a>(
        &self,
        raws: &'a [RawEntity],
        platform: Platform,
        id: &str,
        period: &PeriodSelection,
    ) -> Option<InfluencerDetail<'a>> {
        let raw = raws
            .iter()
            .find(|raw| resolve_identifier(raw, platform) == id)?;
        let entity = normalize(raw, platform);
        let metrics = select_metrics(&entity, period);
        Some(InfluencerDetail {
            entity,
            period: period.clone(),
            metrics,
            summary: summary_for(raw, &period.year),
            raw,
        })
    }
}

impl Default for LeaderboardEngine {
    fn default() -> Self {
        Self::new(FilterThresholds::default())
    }
}

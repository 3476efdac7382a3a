use influrank::leaderboard::LeaderboardEngine;
use influrank::models::{
    Band, FilterState, FilterThresholds, PeriodSelection, Platform, RatingFloor, Timeframe,
};

use crate::common_fixtures::EntityBuilder;

fn fixture() -> Vec<influrank::models::RawEntity> {
    vec![
        EntityBuilder::youtube("UC-a", "Alpha Calls")
            .rating("2024", "30_days", 4.6)
            .score("2024", "30_days", 70.0, 80.0, 65.0)
            .posts("2024", 300)
            .build(),
        EntityBuilder::youtube("UC-b", "Bravo Crypto")
            .rating("2024", "30_days", 2.1)
            .score("2024", "30_days", 95.0, 10.0, 45.0)
            .posts("2024", 60)
            .build(),
        EntityBuilder::youtube("UC-c", "Charlie")
            .rating("2024", "30_days", 3.5)
            .score("2024", "30_days", 40.0, -20.0, 30.0)
            .posts("2024", 10)
            .summary("2024", "Mostly bearish calls")
            .build(),
        EntityBuilder::youtube("UC-d", "Delta").build(),
    ]
}

fn period() -> PeriodSelection {
    PeriodSelection::for_year("2024", Timeframe::ThirtyDays)
}

#[test]
fn computes_ranked_page_for_period() {
    let raws = fixture();
    let engine = LeaderboardEngine::default();

    let result = engine.compute(&raws, Platform::YouTube, &period(), &FilterState::default(), 1, 10);

    let order: Vec<(&str, usize)> = result.page.items.iter().map(|e| (e.id(), e.rank)).collect();
    assert_eq!(order, vec![("UC-b", 1), ("UC-a", 2), ("UC-c", 3)]);
    assert_eq!(result.page.total_items, 3);
    assert_eq!(result.page.total_pages, 1);
}

#[test]
fn filters_compose() {
    let raws = fixture();
    let engine = LeaderboardEngine::default();
    let filters = FilterState::default()
        .with_rating_floor(RatingFloor::AtLeast(2))
        .with_win_rate_band(Band::Mid)
        .with_search_text("crypto");

    let result = engine.compute(&raws, Platform::YouTube, &period(), &filters, 1, 10);
    let ids: Vec<&str> = result.page.items.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["UC-b"]);
}

#[test]
fn paging_through_results() {
    let raws = fixture();
    let engine = LeaderboardEngine::default();

    let second = engine.compute(&raws, Platform::YouTube, &period(), &FilterState::default(), 2, 2);
    let ids: Vec<&str> = second.page.items.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["UC-c"]);
    assert_eq!(second.page.items[0].rank, 3);
    assert_eq!(second.page.total_pages, 2);
}

#[test]
fn recomputation_is_idempotent() {
    let raws = fixture();
    let engine = LeaderboardEngine::default();
    let filters = FilterState::default().with_roi_band(Band::Mid);

    let first = engine.compute(&raws, Platform::YouTube, &period(), &filters, 1, 10);
    let second = engine.compute(&raws, Platform::YouTube, &period(), &filters, 1, 10);
    assert_eq!(
        serde_json::to_value(&first).expect("serializes"),
        serde_json::to_value(&second).expect("serializes")
    );
}

#[test]
fn unfetched_list_yields_empty_page() {
    let engine = LeaderboardEngine::new(FilterThresholds::default());
    let result = engine.compute(&[], Platform::Telegram, &period(), &FilterState::default(), 1, 10);
    assert!(result.page.items.is_empty());
    assert_eq!(result.page.total_pages, 1);
}

#[test]
fn detail_finds_entity_by_identifier() {
    let raws = fixture();
    let engine = LeaderboardEngine::default();

    let detail = engine
        .detail(&raws, Platform::YouTube, "UC-c", &period())
        .expect("entity exists");
    assert_eq!(detail.entity.name, "Charlie");
    assert_eq!(detail.metrics.rating, 3.5);
    assert_eq!(detail.metrics.post_count, 10);
    assert_eq!(detail.summary, "Mostly bearish calls");

    assert!(engine
        .detail(&raws, Platform::YouTube, "UC-zzz", &period())
        .is_none());
}

use influrank::leaderboard::filters::{
    normalize_query, passes_rating_floor, passes_search, passes_year_presence,
};
use influrank::leaderboard::{apply_filters, FilterPipeline, FilterStage, LeaderboardEngine};
use influrank::models::{
    Band, BandThresholds, FilterState, FilterThresholds, PeriodSelection, Platform, RatingFloor,
    RawEntity, Timeframe, YearSelection,
};

use crate::common_fixtures::{plain_entities, scored, EntityBuilder};

fn all_years() -> PeriodSelection {
    PeriodSelection::new(YearSelection::All, Timeframe::ThirtyDays)
}

#[test]
fn stages_run_in_fixed_order() {
    assert_eq!(FilterStage::ORDER[0], FilterStage::YearPresence);
    assert_eq!(FilterStage::ORDER[5], FilterStage::Search);
}

#[test]
fn specific_year_excludes_entities_without_rating_there() {
    let raws = vec![
        EntityBuilder::youtube("UC1", "Rated")
            .rating("2023", "30_days", 4.5)
            .build(),
        EntityBuilder::youtube("UC2", "Unrated").build(),
    ];
    let engine = LeaderboardEngine::default();

    let period_2023 = PeriodSelection::for_year("2023", Timeframe::ThirtyDays);
    let scored_2023 = engine.score(&raws, Platform::YouTube, &period_2023);
    assert_eq!(scored_2023[0].rating, 4.5);
    let kept = apply_filters(
        scored_2023,
        &FilterState::default(),
        &period_2023,
        &FilterThresholds::default(),
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id(), "UC1");

    let period_2024 = PeriodSelection::for_year("2024", Timeframe::ThirtyDays);
    let scored_2024 = engine.score(&raws, Platform::YouTube, &period_2024);
    assert_eq!(scored_2024[0].rating, 0.0);
    let kept = apply_filters(
        scored_2024,
        &FilterState::default(),
        &period_2024,
        &FilterThresholds::default(),
    );
    assert!(kept.is_empty());
}

#[test]
fn all_years_keeps_unrated_entities() {
    let raws = plain_entities(3);
    let entities = raws.iter().map(|r| scored(r, 0.0, 0.0, 0.0, 0.0, 0)).collect();
    let kept = apply_filters(
        entities,
        &FilterState::default(),
        &all_years(),
        &FilterThresholds::default(),
    );
    assert_eq!(kept.len(), 3);
}

#[test]
fn rating_floor_compares_whole_stars() {
    let raws = plain_entities(1);
    let entity = scored(&raws[0], 3.9, 0.0, 0.0, 0.0, 0);
    assert!(passes_rating_floor(&entity, RatingFloor::AtLeast(3)));
    assert!(!passes_rating_floor(&entity, RatingFloor::AtLeast(4)));
    assert!(passes_rating_floor(&entity, RatingFloor::All));
}

#[test]
fn bands_are_half_open() {
    let thresholds = BandThresholds::new(40.0, 60.0);
    assert!(Band::Low.contains(39.9, &thresholds));
    assert!(Band::Mid.contains(40.0, &thresholds));
    assert!(!Band::Mid.contains(60.0, &thresholds));
    assert!(Band::High.contains(60.0, &thresholds));
    assert!(Band::All.contains(f64::MIN, &thresholds));
}

#[test]
fn band_parse_falls_back_to_all() {
    assert_eq!(Band::parse("HIGH"), Band::High);
    assert_eq!(Band::parse("medium"), Band::Mid);
    assert_eq!(Band::parse("sideways"), Band::All);
}

#[test]
fn band_filters_use_their_own_metric() {
    let raws = plain_entities(3);
    let entities = vec![
        scored(&raws[0], 0.0, 0.0, 75.0, 30.0, 10),
        scored(&raws[1], 0.0, 0.0, 25.0, 50.0, 120),
        scored(&raws[2], 0.0, 0.0, -5.0, 70.0, 500),
    ];
    let period = all_years();
    let thresholds = FilterThresholds::default();

    let high_roi = FilterState::default().with_roi_band(Band::High);
    let pipeline = FilterPipeline::new(&high_roi, &period, &thresholds);
    let ids: Vec<&str> = entities.iter().filter(|e| pipeline.accepts(e)).map(|e| e.id()).collect();
    assert_eq!(ids, vec!["chan-0"]);

    let mid_win = FilterState::default().with_win_rate_band(Band::Mid);
    let pipeline = FilterPipeline::new(&mid_win, &period, &thresholds);
    let ids: Vec<&str> = entities.iter().filter(|e| pipeline.accepts(e)).map(|e| e.id()).collect();
    assert_eq!(ids, vec!["chan-1"]);

    let high_volume = FilterState::default().with_volume_band(Band::High);
    let pipeline = FilterPipeline::new(&high_volume, &period, &thresholds);
    let ids: Vec<&str> = entities.iter().filter(|e| pipeline.accepts(e)).map(|e| e.id()).collect();
    assert_eq!(ids, vec!["chan-2"]);
}

#[test]
fn search_is_case_insensitive_on_name_or_id() {
    let raw = EntityBuilder::youtube("UC-king", "CryptoKing").build();
    let entity = scored(&raw, 0.0, 0.0, 0.0, 0.0, 0);

    assert!(passes_search(&entity, &normalize_query("crypto")));
    assert!(passes_search(&entity, &normalize_query("  uc-KING ")));
    assert!(!passes_search(&entity, &normalize_query("xyz123")));
    assert!(passes_search(&entity, &normalize_query("   ")));
}

/// Mixed 2023 records covering each band on each banded metric.
fn mixed_2023() -> Vec<RawEntity> {
    let rows = [
        ("UC-1", "Crypto Whale", 4.8, 70.0, 55.0, 120),
        ("UC-2", "Crypto Minnow", 3.2, 20.0, 45.0, 90),
        ("UC-3", "Moon Crypto", 0.0, 30.0, 50.0, 100),
        ("UC-4", "Chart School", 4.1, 25.0, 48.0, 150),
        ("UC-5", "crypto daily", 2.9, 10.0, 52.0, 60),
        ("UC-6", "CRYPTO Alpha", 3.7, 4.0, 58.0, 199),
        ("UC-7", "Cryptonite", 4.0, 12.0, 61.0, 80),
        ("UC-8", "Crypto Cold", 3.0, 49.9, 40.0, 50),
    ];
    rows.iter()
        .map(|(id, name, rating, roi, win_rate, posts)| {
            EntityBuilder::youtube(id, name)
                .rating("2023", "30_days", *rating)
                .score("2023", "30_days", 1.0, *roi, *win_rate)
                .posts("2023", *posts)
                .build()
        })
        .collect()
}

fn every_stage_active() -> FilterState {
    FilterState::default()
        .with_rating_floor(RatingFloor::AtLeast(3))
        .with_roi_band(Band::Mid)
        .with_win_rate_band(Band::Mid)
        .with_volume_band(Band::Mid)
        .with_search_text(" Crypto ")
}

#[test]
fn filtered_output_is_a_subset_in_input_order() {
    let raws = mixed_2023();
    let period = PeriodSelection::for_year("2023", Timeframe::ThirtyDays);
    let thresholds = FilterThresholds::default();
    let state = every_stage_active();
    let engine = LeaderboardEngine::default();

    let input_ids: Vec<String> = engine
        .score(&raws, Platform::YouTube, &period)
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    let kept = apply_filters(
        engine.score(&raws, Platform::YouTube, &period),
        &state,
        &period,
        &thresholds,
    );

    let kept_ids: Vec<&str> = kept.iter().map(|e| e.id()).collect();
    assert_eq!(kept_ids, vec!["UC-2", "UC-6", "UC-8"]);

    let positions: Vec<usize> = kept_ids
        .iter()
        .map(|id| input_ids.iter().position(|input| input == id).expect("kept id is an input id"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let needle = normalize_query(&state.search_text);
    for entity in &kept {
        assert!(passes_year_presence(entity, &period));
        assert!(passes_rating_floor(entity, state.rating_floor));
        assert!(state.roi_band.contains(entity.roi, &thresholds.roi));
        assert!(state.win_rate_band.contains(entity.win_rate, &thresholds.win_rate));
        assert!(state
            .volume_band
            .contains(entity.post_count as f64, &thresholds.volume));
        assert!(passes_search(entity, &needle));
    }
}

#[test]
fn filtering_twice_matches_filtering_once() {
    let raws = mixed_2023();
    let period = PeriodSelection::for_year("2023", Timeframe::ThirtyDays);
    let thresholds = FilterThresholds::default();
    let state = every_stage_active();
    let engine = LeaderboardEngine::default();

    let once = apply_filters(
        engine.score(&raws, Platform::YouTube, &period),
        &state,
        &period,
        &thresholds,
    );
    let twice = apply_filters(
        apply_filters(
            engine.score(&raws, Platform::YouTube, &period),
            &state,
            &period,
            &thresholds,
        ),
        &state,
        &period,
        &thresholds,
    );

    let once_ids: Vec<&str> = once.iter().map(|e| e.id()).collect();
    let twice_ids: Vec<&str> = twice.iter().map(|e| e.id()).collect();
    assert!(!once_ids.is_empty());
    assert_eq!(once_ids, twice_ids);
}

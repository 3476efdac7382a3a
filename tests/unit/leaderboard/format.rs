use influrank::leaderboard::{bar_width_pct, format_count, format_rating, format_roi, format_win_rate};

#[test]
fn roi_formats_with_magnitude_suffixes() {
    assert_eq!(format_roi(Some(1.25e9)), "1B%");
    assert_eq!(format_roi(Some(3.6e12)), "4T%");
    assert_eq!(format_roi(Some(2.4e6)), "2M%");
    assert_eq!(format_roi(Some(-7.5e6)), "-8M%");
    assert_eq!(format_roi(Some(42.4)), "42%");
    assert_eq!(format_roi(Some(-12.6)), "-13%");
    assert_eq!(format_roi(Some(0.456)), "0.46%");
}

#[test]
fn roi_without_data_renders_zero() {
    assert_eq!(format_roi(None), "0%");
    assert_eq!(format_roi(Some(0.0)), "0%");
    assert_eq!(format_roi(Some(f64::NAN)), "0%");
    assert_eq!(format_roi(Some(f64::INFINITY)), "0%");
    assert_eq!(format_roi(Some(0.001)), "0.00%");
}

#[test]
fn bar_width_is_clamped() {
    assert_eq!(bar_width_pct(50.0, 100.0), 50.0);
    assert_eq!(bar_width_pct(150.0, 100.0), 100.0);
    assert_eq!(bar_width_pct(-5.0, 100.0), 0.0);
    assert_eq!(bar_width_pct(1.0, 0.0), 100.0);
    assert_eq!(bar_width_pct(f64::NAN, 10.0), 0.0);
}

#[test]
fn rating_and_win_rate_show_no_data_marker() {
    assert_eq!(format_rating(4.26), "4.3");
    assert_eq!(format_rating(0.0), "N/A");
    assert_eq!(format_win_rate(61.04), "61.0%");
    assert_eq!(format_win_rate(0.0), "N/A");
}

#[test]
fn counts_are_compacted() {
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1K");
    assert_eq!(format_count(1234), "1.2K");
    assert_eq!(format_count(3_000_000), "3M");
    assert_eq!(format_count(5_600_000_000), "5.6B");
}

#[test]
fn counts_rounding_to_a_thousand_move_up_a_unit() {
    assert_eq!(format_count(999_949), "999.9K");
    assert_eq!(format_count(999_950), "1M");
    assert_eq!(format_count(999_960_000), "1B");
    assert_eq!(format_count(1_500_000), "1.5M");
}

//! Display formatting for leaderboard values.
//!
//! Missing, zero and non-finite inputs all render as "no data"; nothing here
//! can produce `NaN` or `inf` text.

/// Smallest denominator used when scaling bars against a maximum.
pub const MIN_BAR_DENOMINATOR: f64 = 1e-9;

pub const NO_DATA: &str = "N/A";

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// Format a ROI percentage with magnitude suffixes.
///
/// `None`, zero and non-finite values render as `0%`. Magnitudes from one
/// million up are rounded to the nearest whole unit of their suffix.
pub fn format_roi(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite() && *v != 0.0) else {
        return "0%".to_string();
    };

    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if magnitude >= TRILLION {
        format!("{}{}T%", sign, (magnitude / TRILLION).round())
    } else if magnitude >= BILLION {
        format!("{}{}B%", sign, (magnitude / BILLION).round())
    } else if magnitude >= MILLION {
        format!("{}{}M%", sign, (magnitude / MILLION).round())
    } else if magnitude >= 1.0 {
        format!("{}{}%", sign, magnitude.round())
    } else {
        let fixed = format!("{:.2}", magnitude);
        if fixed == "0.00" {
            "0.00%".to_string()
        } else {
            format!("{}{}%", sign, fixed)
        }
    }
}

/// Bar width in percent of `max`, clamped to `[0, 100]`.
pub fn bar_width_pct(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let denominator = if max.is_finite() {
        max.abs().max(MIN_BAR_DENOMINATOR)
    } else {
        MIN_BAR_DENOMINATOR
    };
    (value / denominator * 100.0).clamp(0.0, 100.0)
}

/// Star rating with one decimal, or `N/A` without a rating.
pub fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating > 0.0 {
        format!("{:.1}", rating)
    } else {
        NO_DATA.to_string()
    }
}

/// Win rate percentage with one decimal, or `N/A` without data.
pub fn format_win_rate(win_rate: f64) -> String {
    if win_rate.is_finite() && win_rate > 0.0 {
        format!("{:.1}%", win_rate)
    } else {
        NO_DATA.to_string()
    }
}

/// Compact subscriber count: `999`, `1.2K`, `3M`, `5.6B`.
///
/// A value that rounds up to 1000 of its unit moves to the next unit, so
/// `999_950` reads `1M` rather than `1000K`.
pub fn format_count(count: u64) -> String {
    const UNITS: [(f64, &str); 3] = [(THOUSAND, "K"), (MILLION, "M"), (BILLION, "B")];

    let value = count as f64;
    let Some(mut unit) = UNITS.iter().rposition(|(size, _)| value >= *size) else {
        return count.to_string();
    };

    let mut fixed = format!("{:.1}", value / UNITS[unit].0);
    let reaches_next = fixed.parse::<f64>().is_ok_and(|scaled| scaled >= THOUSAND);
    if reaches_next && unit + 1 < UNITS.len() {
        unit += 1;
        fixed = format!("{:.1}", value / UNITS[unit].0);
    }

    let trimmed = fixed.strip_suffix(".0").unwrap_or(&fixed);
    format!("{}{}", trimmed, UNITS[unit].1)
}

//! Period resolution and the option lists that depend on the selected year.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::models::period::{Quarter, Timeframe, YearSelection, ALL_YEARS_KEY};

/// Outcome of validating a timeframe against the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "timeframe", rename_all = "snake_case")]
pub enum TimeframeResolution {
    Valid(Timeframe),
    /// The requested timeframe is not offered; the default was substituted.
    FellBack(Timeframe),
}

impl TimeframeResolution {
    pub fn timeframe(&self) -> Timeframe {
        match self {
            Self::Valid(tf) | Self::FellBack(tf) => *tf,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, Self::FellBack(_))
    }
}

/// Today's date in UTC, the reference for "current year" option lists.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Year key into the nested statistic maps.
pub fn resolve_year_key(year: &YearSelection) -> &str {
    match year {
        YearSelection::All => ALL_YEARS_KEY,
        YearSelection::Year(year) => year,
    }
}

/// Timeframe key into the nested statistic maps (verbatim).
pub fn resolve_timeframe_key(timeframe: Timeframe) -> &'static str {
    timeframe.key()
}

/// Where the selected year sits relative to today.
enum YearPosition {
    Unbounded,
    Past,
    Current { elapsed_days: u32, month: u32 },
    Future,
}

fn year_position(year: &YearSelection, today: NaiveDate) -> YearPosition {
    let Some(number) = year.number() else {
        return YearPosition::Unbounded;
    };
    match number.cmp(&today.year()) {
        std::cmp::Ordering::Less => YearPosition::Past,
        std::cmp::Ordering::Equal => YearPosition::Current {
            elapsed_days: today.ordinal(),
            month: today.month(),
        },
        std::cmp::Ordering::Greater => YearPosition::Future,
    }
}

/// Timeframes offered for `year`, shortest first.
///
/// All years and completed years offer everything. The running year offers
/// the short timeframes up to the default plus any lookback that already
/// fits inside the days elapsed. A year that has not started offers only the
/// short ones, so the default always stays selectable.
pub fn timeframe_options_for(year: &YearSelection, today: NaiveDate) -> Vec<Timeframe> {
    let elapsed_days = match year_position(year, today) {
        YearPosition::Unbounded | YearPosition::Past => return Timeframe::ALL.to_vec(),
        YearPosition::Current { elapsed_days, .. } => elapsed_days,
        YearPosition::Future => 0,
    };

    Timeframe::ALL
        .into_iter()
        .filter(|tf| *tf <= Timeframe::DEFAULT || tf.lookback_days() <= elapsed_days)
        .collect()
}

/// Quarters offered for `year`, in calendar order.
pub fn quarter_options_for(year: &YearSelection, today: NaiveDate) -> Vec<Quarter> {
    match year_position(year, today) {
        YearPosition::Past => Quarter::ALL.to_vec(),
        YearPosition::Current { month, .. } => Quarter::ALL
            .into_iter()
            .filter(|q| q.start_month() <= month)
            .collect(),
        YearPosition::Unbounded | YearPosition::Future => Vec::new(),
    }
}

/// Keep `timeframe` if `year` offers it, otherwise fall back to the default.
pub fn validate_timeframe(
    year: &YearSelection,
    timeframe: Timeframe,
    today: NaiveDate,
) -> TimeframeResolution {
    if timeframe_options_for(year, today).contains(&timeframe) {
        TimeframeResolution::Valid(timeframe)
    } else {
        TimeframeResolution::FellBack(Timeframe::DEFAULT)
    }
}

/// Keep `quarter` if `year` offers it, otherwise clear it.
pub fn validate_quarter(
    year: &YearSelection,
    quarter: Option<Quarter>,
    today: NaiveDate,
) -> Option<Quarter> {
    quarter.filter(|q| quarter_options_for(year, today).contains(q))
}

/// Year choices: all years, then the current year down to `first_year`.
pub fn year_options(today: NaiveDate, first_year: i32) -> Vec<YearSelection> {
    std::iter::once(YearSelection::All)
        .chain(
            (first_year..=today.year())
                .rev()
                .map(|y| YearSelection::Year(y.to_string())),
        )
        .collect()
}

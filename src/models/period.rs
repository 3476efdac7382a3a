//! Period selection data models: year, holding-period timeframe, quarter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nested-map key used for the "all years" bucket.
pub const ALL_YEARS_KEY: &str = "all_years";

/// Selected year: every year combined, or one calendar year as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YearSelection {
    #[default]
    All,
    Year(String),
}

impl YearSelection {
    /// Parse a UI value. Empty input, `"all"` and `"all_years"` select all years.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed == ALL_YEARS_KEY
        {
            Self::All
        } else {
            Self::Year(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Year(year) => year,
        }
    }

    /// Numeric calendar year, if the selection is a parseable year.
    pub fn number(&self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year(year) => year.parse().ok(),
        }
    }
}

impl From<String> for YearSelection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<YearSelection> for String {
    fn from(value: YearSelection) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holding-period timeframe. Variants are declared in increasing duration,
/// so the derived `Ord` sorts shortest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Timeframe {
    #[serde(rename = "1_hour")]
    OneHour,
    #[serde(rename = "24_hours")]
    OneDay,
    #[serde(rename = "7_days")]
    SevenDays,
    #[default]
    #[serde(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "60_days")]
    SixtyDays,
    #[serde(rename = "90_days")]
    NinetyDays,
    #[serde(rename = "180_days")]
    HalfYear,
    #[serde(rename = "1_year")]
    OneYear,
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Timeframe::OneHour,
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::SixtyDays,
        Timeframe::NinetyDays,
        Timeframe::HalfYear,
        Timeframe::OneYear,
    ];

    /// Fallback when a selected timeframe is not offered.
    pub const DEFAULT: Timeframe = Timeframe::ThirtyDays;

    pub fn key(&self) -> &'static str {
        match self {
            Self::OneHour => "1_hour",
            Self::OneDay => "24_hours",
            Self::SevenDays => "7_days",
            Self::ThirtyDays => "30_days",
            Self::SixtyDays => "60_days",
            Self::NinetyDays => "90_days",
            Self::HalfYear => "180_days",
            Self::OneYear => "1_year",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|tf| tf.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneHour => "1 Hour",
            Self::OneDay => "24 Hours",
            Self::SevenDays => "7 Days",
            Self::ThirtyDays => "30 Days",
            Self::SixtyDays => "60 Days",
            Self::NinetyDays => "90 Days",
            Self::HalfYear => "180 Days",
            Self::OneYear => "1 Year",
        }
    }

    /// Lookback length in whole days (sub-day timeframes count as zero).
    pub fn lookback_days(&self) -> u32 {
        match self {
            Self::OneHour => 0,
            Self::OneDay => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::SixtyDays => 60,
            Self::NinetyDays => 90,
            Self::HalfYear => 180,
            Self::OneYear => 365,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Calendar quarter, forwarded to the backend bundle query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.key().eq_ignore_ascii_case(key))
    }

    /// First month (1-based) of the quarter.
    pub fn start_month(&self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 4,
            Self::Q3 => 7,
            Self::Q4 => 10,
        }
    }
}

/// Year + timeframe; selects which nested statistic bucket is read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodSelection {
    pub year: YearSelection,
    pub timeframe: Timeframe,
}

impl PeriodSelection {
    pub fn new(year: YearSelection, timeframe: Timeframe) -> Self {
        Self { year, timeframe }
    }

    pub fn for_year(year: &str, timeframe: Timeframe) -> Self {
        Self::new(YearSelection::parse(year), timeframe)
    }
}

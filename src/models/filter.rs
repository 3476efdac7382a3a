//! Client-side filter state for the leaderboard

use serde::{Deserialize, Serialize};

/// Three-way numeric band filter plus an "all" pass-through.
///
/// With thresholds `low < high` the bands are `Low = (-inf, low)`,
/// `Mid = [low, high)` and `High = [high, +inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    #[default]
    All,
    High,
    Mid,
    Low,
}

impl Band {
    /// Parse a UI value. Unknown values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "mid" | "medium" => Self::Mid,
            "low" => Self::Low,
            _ => Self::All,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
        }
    }

    pub fn contains(&self, value: f64, thresholds: &BandThresholds) -> bool {
        match self {
            Self::All => true,
            Self::High => value >= thresholds.high,
            Self::Mid => value >= thresholds.low && value < thresholds.high,
            Self::Low => value < thresholds.low,
        }
    }
}

/// Band edges: `low` opens the mid band, `high` opens the top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub low: f64,
    pub high: f64,
}

impl BandThresholds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Band thresholds for every banded metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterThresholds {
    pub roi: BandThresholds,
    pub win_rate: BandThresholds,
    pub volume: BandThresholds,
}

impl FilterThresholds {
    pub const ROI: BandThresholds = BandThresholds::new(0.0, 50.0);
    pub const WIN_RATE: BandThresholds = BandThresholds::new(40.0, 60.0);
    pub const VOLUME: BandThresholds = BandThresholds::new(50.0, 200.0);
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            roi: Self::ROI,
            win_rate: Self::WIN_RATE,
            volume: Self::VOLUME,
        }
    }
}

/// Minimum whole-star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RatingFloor {
    #[default]
    All,
    AtLeast(u8),
}

impl RatingFloor {
    pub const MAX_STARS: u8 = 5;

    /// Parse a UI value: `"all"` or a star count `1..=5`. Anything else is `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u8>() {
            Ok(stars) if (1..=Self::MAX_STARS).contains(&stars) => Self::AtLeast(stars),
            _ => Self::All,
        }
    }
}

impl From<String> for RatingFloor {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RatingFloor> for String {
    fn from(value: RatingFloor) -> Self {
        match value {
            RatingFloor::All => "all".to_string(),
            RatingFloor::AtLeast(stars) => stars.to_string(),
        }
    }
}

/// Independent, composable filter settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub rating_floor: RatingFloor,
    pub roi_band: Band,
    pub win_rate_band: Band,
    pub volume_band: Band,
    pub search_text: String,
}

impl FilterState {
    pub fn with_rating_floor(mut self, rating_floor: RatingFloor) -> Self {
        self.rating_floor = rating_floor;
        self
    }

    pub fn with_roi_band(mut self, band: Band) -> Self {
        self.roi_band = band;
        self
    }

    pub fn with_win_rate_band(mut self, band: Band) -> Self {
        self.win_rate_band = band;
        self
    }

    pub fn with_volume_band(mut self, band: Band) -> Self {
        self.volume_band = band;
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }
}

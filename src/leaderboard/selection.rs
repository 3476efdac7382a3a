//! Dashboard selection state and its reset rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::{validate_quarter, validate_timeframe, TimeframeResolution};
use crate::models::entity::Platform;
use crate::models::filter::{Band, FilterState, RatingFloor};
use crate::models::period::{PeriodSelection, Quarter, Timeframe, YearSelection};
use crate::models::query::BundleQuery;

/// Everything the user has picked on the leaderboard.
///
/// Every transition except `set_page` sends the user back to page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub platform: Platform,
    pub period: PeriodSelection,
    pub quarter: Option<Quarter>,
    pub sentiment: Option<String>,
    pub call_type: Option<String>,
    pub filters: FilterState,
    pub page: usize,
}

impl Selection {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            period: PeriodSelection::default(),
            quarter: None,
            sentiment: None,
            call_type: None,
            filters: FilterState::default(),
            page: 1,
        }
    }

    /// Switching platform clears the rating floor.
    pub fn set_platform(&mut self, platform: Platform) {
        if self.platform != platform {
            self.platform = platform;
            self.filters.rating_floor = RatingFloor::All;
        }
        self.page = 1;
    }

    /// Switching year clears the rating floor and re-validates the timeframe
    /// and quarter against what the new year offers.
    pub fn set_year(&mut self, year: YearSelection, today: NaiveDate) -> TimeframeResolution {
        if self.period.year != year {
            self.period.year = year;
            self.filters.rating_floor = RatingFloor::All;
        }
        let resolution = validate_timeframe(&self.period.year, self.period.timeframe, today);
        self.period.timeframe = resolution.timeframe();
        self.quarter = validate_quarter(&self.period.year, self.quarter, today);
        self.page = 1;
        resolution
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe, today: NaiveDate) -> TimeframeResolution {
        let resolution = validate_timeframe(&self.period.year, timeframe, today);
        self.period.timeframe = resolution.timeframe();
        self.page = 1;
        resolution
    }

    pub fn set_quarter(&mut self, quarter: Option<Quarter>, today: NaiveDate) {
        self.quarter = validate_quarter(&self.period.year, quarter, today);
        self.page = 1;
    }

    pub fn set_sentiment(&mut self, sentiment: Option<String>) {
        self.sentiment = sentiment;
        self.page = 1;
    }

    pub fn set_call_type(&mut self, call_type: Option<String>) {
        self.call_type = call_type;
        self.page = 1;
    }

    pub fn set_rating_floor(&mut self, rating_floor: RatingFloor) {
        self.filters.rating_floor = rating_floor;
        self.page = 1;
    }

    pub fn set_roi_band(&mut self, band: Band) {
        self.filters.roi_band = band;
        self.page = 1;
    }

    pub fn set_win_rate_band(&mut self, band: Band) {
        self.filters.win_rate_band = band;
        self.page = 1;
    }

    pub fn set_volume_band(&mut self, band: Band) {
        self.filters.volume_band = band;
        self.page = 1;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
        self.page = 1;
    }

    /// Page navigation. Zero is treated as page 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Backend query for the current selection.
    pub fn bundle_query(&self) -> BundleQuery {
        BundleQuery {
            sentiment: self.sentiment.clone(),
            timeframe: Some(self.period.timeframe.key().to_string()),
            call_type: self.call_type.clone(),
            year: Some(self.period.year.as_str().to_string()),
            quarter: self.quarter.map(|q| q.key().to_string()),
        }
    }
}

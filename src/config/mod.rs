//! Environment-driven configuration.
//!
//! Values are read from the process environment (the binaries load `.env`
//! first). Missing or unparsable values fall back to the defaults below.

use std::env;
use std::str::FromStr;

use crate::leaderboard::trending::DEFAULT_TOP_K;
use crate::models::filter::{BandThresholds, FilterThresholds};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_FIRST_TRACKED_YEAR: i32 = 2022;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Base URL of the backend that serves the influencer listings.
pub fn get_backend_url() -> String {
    env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

pub fn get_port() -> u16 {
    env_or("PORT", DEFAULT_PORT)
}

fn band_from_env(prefix: &str, default: BandThresholds) -> BandThresholds {
    let low = env_or(&format!("{}_BAND_LOW", prefix), default.low);
    let high = env_or(&format!("{}_BAND_HIGH", prefix), default.high);
    if low.is_finite() && high.is_finite() && low < high {
        BandThresholds::new(low, high)
    } else {
        tracing::warn!(
            prefix = prefix,
            low = low,
            high = high,
            "Ignoring invalid band thresholds, using defaults"
        );
        default
    }
}

/// Leaderboard tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardConfig {
    pub page_size: usize,
    pub trending_top_k: usize,
    pub first_tracked_year: i32,
    pub thresholds: FilterThresholds,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            trending_top_k: DEFAULT_TOP_K,
            first_tracked_year: DEFAULT_FIRST_TRACKED_YEAR,
            thresholds: FilterThresholds::default(),
        }
    }
}

impl LeaderboardConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let page_size = env_or("PAGE_SIZE", defaults.page_size);
        let trending_top_k = env_or("TRENDING_TOP_K", defaults.trending_top_k);
        Self {
            page_size: if page_size == 0 { defaults.page_size } else { page_size },
            trending_top_k: if trending_top_k == 0 {
                defaults.trending_top_k
            } else {
                trending_top_k
            },
            first_tracked_year: env_or("FIRST_TRACKED_YEAR", defaults.first_tracked_year),
            thresholds: FilterThresholds {
                roi: band_from_env("ROI", defaults.thresholds.roi),
                win_rate: band_from_env("WIN_RATE", defaults.thresholds.win_rate),
                volume: band_from_env("VOLUME", defaults.thresholds.volume),
            },
        }
    }
}

//! Influencer leaderboard engine.
//!
//! Ranks crypto influencer channels by per-period performance metrics and
//! merges trending-coin mention buckets. The `leaderboard` module is pure;
//! `services` and `core` wrap it with a backend source, a session cache and
//! a JSON HTTP surface.

pub mod config;
pub mod core;
pub mod leaderboard;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

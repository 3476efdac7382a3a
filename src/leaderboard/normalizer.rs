//! Raw record -> canonical entity view

use crate::models::entity::{NormalizedEntity, Platform, RawEntity};

pub const UNKNOWN_NAME: &str = "Unknown";

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn valid_count(value: Option<f64>) -> Option<u64> {
    value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64)
}

/// Stable identifier: the platform handle, then the generic `id`, else empty.
pub fn resolve_identifier(raw: &RawEntity, platform: Platform) -> String {
    let handle = match platform {
        Platform::YouTube => non_blank(raw.channel_id.as_ref()),
        Platform::Telegram => non_blank(raw.username.as_ref()),
    };
    handle
        .or_else(|| non_blank(raw.id.as_ref()))
        .unwrap_or_default()
        .to_string()
}

/// Display name: platform-preferred field, then the identifier, then "Unknown".
pub fn resolve_name(raw: &RawEntity, platform: Platform, identifier: &str) -> String {
    let preferred = match platform {
        Platform::YouTube => non_blank(raw.channel_title.as_ref()),
        Platform::Telegram => non_blank(raw.channel_name.as_ref()),
    };
    let identifier = Some(identifier.trim()).filter(|s| !s.is_empty());
    preferred
        .or(identifier)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// Subscribers: platform primary field, then its alias, else zero.
pub fn resolve_subscribers(raw: &RawEntity, platform: Platform) -> u64 {
    let (primary, alias) = match platform {
        Platform::YouTube => (raw.subscriber_count, raw.subs),
        Platform::Telegram => (raw.subscribers, raw.member_count),
    };
    valid_count(primary).or(valid_count(alias)).unwrap_or(0)
}

/// Build the canonical view of one record. Never fails.
pub fn normalize(raw: &RawEntity, platform: Platform) -> NormalizedEntity<'_> {
    let id = resolve_identifier(raw, platform);
    let name = resolve_name(raw, platform, &id);
    NormalizedEntity {
        name,
        subscriber_count: resolve_subscribers(raw, platform),
        thumbnail_url: non_blank(raw.thumbnail.as_ref()).map(str::to_string),
        platform,
        id,
        raw,
    }
}

pub fn normalize_all(raws: &[RawEntity], platform: Platform) -> Vec<NormalizedEntity<'_>> {
    raws.iter().map(|raw| normalize(raw, platform)).collect()
}

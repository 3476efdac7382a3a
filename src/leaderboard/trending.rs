//! Trending coins: merge per-timeframe top lists into one ranked list.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::coin::{CoinMention, TimeframeMentions, TrendingBuckets, TrendingCoin};
use crate::models::period::Timeframe;

pub const DEFAULT_TOP_K: usize = 10;

fn symbol_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// One row per symbol (case-insensitive), keeping the most mentioned row.
/// Rows with a blank symbol are dropped; first-appearance order is kept.
pub fn strongest_per_symbol(mentions: &[CoinMention]) -> Vec<&CoinMention> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<&CoinMention> = Vec::new();
    for mention in mentions {
        let key = symbol_key(&mention.symbol);
        if key.is_empty() {
            continue;
        }
        match positions.get(&key) {
            Some(&index) => {
                if mention.total_mentions > kept[index].total_mentions {
                    kept[index] = mention;
                }
            }
            None => {
                positions.insert(key, kept.len());
                kept.push(mention);
            }
        }
    }
    kept
}

fn most_mentioned(mut mentions: Vec<&CoinMention>, k: usize) -> Vec<&CoinMention> {
    mentions.sort_by(|a, b| b.total_mentions.cmp(&a.total_mentions));
    mentions.truncate(k);
    mentions
}

/// Top `k` mentions of one bucket, most mentioned first (stable).
pub fn top_k_by_mentions(mentions: &[CoinMention], k: usize) -> Vec<&CoinMention> {
    most_mentioned(mentions.iter().collect(), k)
}

/// Compare mention counts bucket by bucket, shortest timeframe first.
fn cascade_desc(a: &TrendingCoin, b: &TrendingCoin) -> Ordering {
    a.mentions
        .iter()
        .zip(&b.mentions)
        .map(|(ma, mb)| mb.mentions.cmp(&ma.mentions))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Union of every bucket's top `k`, unique by symbol, ordered by the
/// cascading mention key and densely ranked.
pub fn merge_trending(buckets: &TrendingBuckets, top_k: usize) -> Vec<TrendingCoin> {
    let timeframes: Vec<Timeframe> = buckets.timeframes().collect();

    let deduped: HashMap<Timeframe, Vec<&CoinMention>> = timeframes
        .iter()
        .map(|tf| (*tf, strongest_per_symbol(buckets.bucket(*tf))))
        .collect();

    // Full mention lookup per bucket, built from the same rows the top-K sees.
    let lookup: HashMap<Timeframe, HashMap<String, u64>> = deduped
        .iter()
        .map(|(tf, rows)| {
            let counts: HashMap<String, u64> = rows
                .iter()
                .map(|mention| (symbol_key(&mention.symbol), mention.total_mentions))
                .collect();
            (*tf, counts)
        })
        .collect();

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for timeframe in &timeframes {
        let rows = deduped.get(timeframe).cloned().unwrap_or_default();
        for mention in most_mentioned(rows, top_k) {
            let key = symbol_key(&mention.symbol);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            let mentions = timeframes
                .iter()
                .map(|tf| TimeframeMentions {
                    timeframe: *tf,
                    mentions: lookup
                        .get(tf)
                        .and_then(|counts| counts.get(&key))
                        .copied()
                        .unwrap_or(0),
                })
                .collect();
            merged.push(TrendingCoin {
                symbol: mention.symbol.trim().to_string(),
                name: mention.name.clone(),
                mentions,
                rank: 0,
            });
        }
    }

    merged.sort_by(cascade_desc);
    merged
        .into_iter()
        .enumerate()
        .map(|(index, coin)| TrendingCoin {
            rank: index + 1,
            ..coin
        })
        .collect()
}

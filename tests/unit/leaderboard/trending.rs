use influrank::leaderboard::merge_trending;
use influrank::leaderboard::trending::{strongest_per_symbol, top_k_by_mentions};
use influrank::models::{CoinMention, Timeframe, TrendingBuckets};

fn symbols(coins: &[influrank::models::TrendingCoin]) -> Vec<&str> {
    coins.iter().map(|c| c.symbol.as_str()).collect()
}

#[test]
fn top_k_keeps_most_mentioned() {
    let mentions = vec![
        CoinMention::new("BTC", 5),
        CoinMention::new("ETH", 9),
        CoinMention::new("SOL", 7),
    ];
    let top: Vec<&str> = top_k_by_mentions(&mentions, 2)
        .into_iter()
        .map(|m| m.symbol.as_str())
        .collect();
    assert_eq!(top, vec!["ETH", "SOL"]);
}

#[test]
fn merge_unions_top_lists_and_fills_missing_buckets_with_zero() {
    let buckets = TrendingBuckets::new()
        .with_bucket(
            Timeframe::OneDay,
            vec![CoinMention::new("BTC", 40), CoinMention::new("PEPE", 30)],
        )
        .with_bucket(
            Timeframe::SevenDays,
            vec![CoinMention::new("ETH", 90), CoinMention::new("BTC", 80)],
        );

    let merged = merge_trending(&buckets, 10);
    assert_eq!(symbols(&merged), vec!["BTC", "PEPE", "ETH"]);

    let eth = &merged[2];
    assert_eq!(eth.mentions_in(Timeframe::OneDay), 0);
    assert_eq!(eth.mentions_in(Timeframe::SevenDays), 90);
    assert_eq!(eth.mentions.len(), 2);
    let ranks: Vec<usize> = merged.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn merge_counts_mentions_outside_the_top_k() {
    let buckets = TrendingBuckets::new()
        .with_bucket(
            Timeframe::OneDay,
            vec![CoinMention::new("BTC", 50), CoinMention::new("ETH", 10)],
        )
        .with_bucket(Timeframe::SevenDays, vec![CoinMention::new("ETH", 70)]);

    let merged = merge_trending(&buckets, 1);
    assert_eq!(symbols(&merged), vec!["BTC", "ETH"]);
    assert_eq!(merged[1].mentions_in(Timeframe::OneDay), 10);
}

#[test]
fn symbols_are_unique_case_insensitively() {
    let buckets = TrendingBuckets::new()
        .with_bucket(Timeframe::OneDay, vec![CoinMention::new("btc", 5)])
        .with_bucket(
            Timeframe::SevenDays,
            vec![CoinMention::new("BTC", 8), CoinMention::new("  ", 100)],
        );

    let merged = merge_trending(&buckets, 10);
    assert_eq!(symbols(&merged), vec!["btc"]);
    assert_eq!(merged[0].mentions_in(Timeframe::SevenDays), 8);
}

#[test]
fn duplicate_symbol_in_one_bucket_counts_its_strongest_row() {
    let buckets = TrendingBuckets::new().with_bucket(
        Timeframe::OneDay,
        vec![
            CoinMention::new("BTC", 5),
            CoinMention::new("ETH", 20),
            CoinMention::new("btc", 50),
        ],
    );

    let merged = merge_trending(&buckets, 10);
    let rows: Vec<(&str, u64)> = merged
        .iter()
        .map(|c| (c.symbol.as_str(), c.mentions_in(Timeframe::OneDay)))
        .collect();
    assert_eq!(rows, vec![("btc", 50), ("ETH", 20)]);
    assert_eq!(merged[0].rank, 1);
}

#[test]
fn duplicate_rows_take_a_single_top_k_slot() {
    let buckets = TrendingBuckets::new().with_bucket(
        Timeframe::OneDay,
        vec![
            CoinMention::new("SOL", 30),
            CoinMention::new("sol", 25),
            CoinMention::new("ETH", 10),
        ],
    );

    let merged = merge_trending(&buckets, 2);
    assert_eq!(symbols(&merged), vec!["SOL", "ETH"]);
    assert_eq!(merged[0].mentions_in(Timeframe::OneDay), 30);
}

#[test]
fn strongest_row_keeps_first_appearance_order() {
    let mentions = vec![
        CoinMention::new("BTC", 5),
        CoinMention::new(" ", 99),
        CoinMention::new("ETH", 20),
        CoinMention::new("btc", 50),
    ];
    let rows: Vec<(&str, u64)> = strongest_per_symbol(&mentions)
        .into_iter()
        .map(|m| (m.symbol.as_str(), m.total_mentions))
        .collect();
    assert_eq!(rows, vec![("btc", 50), ("ETH", 20)]);
}

#[test]
fn buckets_from_backend_json_skip_unknown_keys() {
    let buckets = TrendingBuckets::from_value(serde_json::json!({
        "24_hours": [{ "symbol": "BTC", "totalMentions": "12" }, "junk"],
        "fortnight": [{ "symbol": "ETH", "totalMentions": 3 }],
        "7_days": "oops"
    }));

    let timeframes: Vec<Timeframe> = buckets.timeframes().collect();
    assert_eq!(timeframes, vec![Timeframe::OneDay]);
    assert_eq!(buckets.bucket(Timeframe::OneDay), &[CoinMention::new("BTC", 12)]);
}

#[test]
fn empty_buckets_merge_to_nothing() {
    assert!(merge_trending(&TrendingBuckets::new(), 10).is_empty());
}

use crate::models::{QuerySpec, SearchIntent, Topic, VideoCategory};
use chrono::{DateTime, Duration, Utc};

pub const MAX_GENERAL_QUERIES: usize = 8;
pub const MAX_TOPIC_QUERIES: usize = 5;
pub const MAX_CATEGORY_QUERIES: usize = 4;

const GENERAL_QUERIES: &[&str] = &[
    "台灣ETF",
    "ETF投資",
    "元大0050",
    "高股息ETF",
    "0056 ETF",
    "00878 ETF",
    "ETF存股",
    "市值型ETF",
];

/// Issued once per restricted category, so the fan-out is twice this list.
const CATEGORY_QUERIES: &[&str] = &["ETF 投資理財", "ETF 理財教學"];

const CATEGORIES: [VideoCategory; 2] = [VideoCategory::NewsPolitics, VideoCategory::Education];

fn topic_queries(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Active => &["主動式ETF", "主動型ETF", "00980A", "00981A", "主動ETF 經理人"],
        Topic::MultiAsset => &["多資產ETF", "資產配置ETF", "股債平衡ETF", "多重資產ETF"],
        Topic::MarketCap => &["市值型ETF", "0050 ETF", "006208", "00922 ETF", "台灣50 ETF"],
        Topic::Dividend => &["高股息ETF", "0056 ETF", "00878 ETF", "00919 ETF", "00929 ETF"],
        Topic::ChinaExposure => &["陸股ETF", "中國ETF", "滬深300 ETF", "A股ETF", "00752 ETF"],
    }
}

/// Start of the recency window. Computed once per run and shared by every query.
pub fn recency_cutoff(window_hours: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(i64::from(window_hours))
}

/// Ordered queries for one ranking request. Output size is bounded by the per-mode
/// constants above and identical inputs always produce identical plans.
pub fn plan(intent: &SearchIntent, now: DateTime<Utc>) -> Vec<QuerySpec> {
    let published_after = recency_cutoff(intent.window_hours, now);
    let planned = |query: &str, category: Option<VideoCategory>| QuerySpec {
        query: query.to_string(),
        category,
        published_after,
    };

    if intent.education_mode {
        return CATEGORY_QUERIES
            .iter()
            .flat_map(|q| CATEGORIES.into_iter().map(move |c| (*q, c)))
            .map(|(q, c)| planned(q, Some(c)))
            .take(MAX_CATEGORY_QUERIES)
            .collect();
    }

    match intent.topic {
        Some(topic) => topic_queries(topic)
            .iter()
            .take(MAX_TOPIC_QUERIES)
            .map(|q| planned(*q, None))
            .collect(),
        None => GENERAL_QUERIES
            .iter()
            .take(MAX_GENERAL_QUERIES)
            .map(|q| planned(*q, None))
            .collect(),
    }
}

use crate::models::VideoRecord;
use chrono::{DateTime, Utc};

/// Comments count double in the engagement score.
const COMMENT_WEIGHT: u64 = 2;

/// Whole days since publication, never below 1. Future timestamps count as same-day.
pub fn days_since_publish(published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published_at).num_days().max(1)
}

pub fn view_per_day(
    view_count: u64,
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    match published_at {
        Some(published) => view_count as f64 / days_since_publish(published, now) as f64,
        None => 0.0,
    }
}

pub fn engagement_score(like_count: u64, comment_count: u64) -> u64 {
    like_count.saturating_add(comment_count.saturating_mul(COMMENT_WEIGHT))
}

/// Engagement score per hundred views.
pub fn engagement_rate(score: u64, view_count: u64) -> f64 {
    score as f64 / view_count.max(1) as f64 * 100.0
}

pub fn engagement_ratio(like_count: u64, comment_count: u64, view_count: u64) -> f64 {
    if view_count == 0 {
        return 0.0;
    }
    like_count.saturating_add(comment_count) as f64 / view_count as f64
}

/// Fill in every derived field. Depends only on the record's counters, its publish time
/// and `now`, so calling it again with the same `now` changes nothing.
pub fn derive_metrics(record: &mut VideoRecord, now: DateTime<Utc>) {
    record.view_per_day = view_per_day(record.view_count, record.published_at, now);
    record.engagement_score = engagement_score(record.like_count, record.comment_count);
    record.engagement_rate = engagement_rate(record.engagement_score, record.view_count);
    record.engagement_ratio =
        engagement_ratio(record.like_count, record.comment_count, record.view_count);
}

use crate::models::{SortSignal, VideoRecord};
use crate::utils::{compare_desc_float, compare_desc_int};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Collapse records sharing a video ID. The last record seen for an ID wins, but it
/// keeps the slot of the first occurrence so the output order is reproducible.
pub fn dedupe(records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<VideoRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.video_id) {
            Some(&idx) => unique[idx] = record,
            None => {
                slots.insert(record.video_id.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

fn compare_by_signal(a: &VideoRecord, b: &VideoRecord, signal: SortSignal) -> Ordering {
    match signal {
        SortSignal::ViewPerDay => compare_desc_float(a.view_per_day, b.view_per_day),
        SortSignal::EngagementRatio => compare_desc_float(a.engagement_ratio, b.engagement_ratio),
        SortSignal::ViewCount => compare_desc_int(a.view_count, b.view_count),
        SortSignal::EngagementScore => compare_desc_int(a.engagement_score, b.engagement_score),
    }
}

/// Sort descending by `signal` and keep at most `cap` records. Ties keep input order.
///
/// The walk after sorting tracks emitted IDs on its own, so the result never holds a
/// duplicate ID even when `records` was not deduplicated.
pub fn rank(mut records: Vec<VideoRecord>, signal: SortSignal, cap: usize) -> Vec<VideoRecord> {
    records.sort_by(|a, b| compare_by_signal(a, b, signal));

    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked = Vec::with_capacity(cap.min(records.len()));
    for record in records {
        if ranked.len() >= cap {
            break;
        }
        if seen.insert(record.video_id.clone()) {
            ranked.push(record);
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, views: u64, view_per_day: f64, engagement_ratio: f64) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: format!("ETF {id}"),
            channel_title: "理財小達人".to_string(),
            published_at: None,
            view_count: views,
            like_count: 0,
            comment_count: 0,
            url: format!("https://www.youtube.com/watch?v={id}"),
            thumbnail_url: String::new(),
            view_per_day,
            engagement_score: 0,
            engagement_ratio,
            engagement_rate: 0.0,
        }
    }

    fn ids(records: &[VideoRecord]) -> Vec<&str> {
        records.iter().map(|r| r.video_id.as_str()).collect()
    }

    #[test]
    fn dedupe_keeps_last_value_in_first_slot() {
        let records = vec![
            video("a", 10, 1.0, 0.0),
            video("b", 20, 2.0, 0.0),
            video("a", 30, 3.0, 0.0),
        ];
        let unique = dedupe(records);
        assert_eq!(ids(&unique), vec!["a", "b"]);
        assert_eq!(unique[0].view_count, 30);
    }

    #[test]
    fn rank_sorts_by_view_velocity_descending() {
        let records = vec![
            video("slow", 100, 10.0, 0.5),
            video("fast", 100, 90.0, 0.1),
            video("mid", 100, 40.0, 0.3),
        ];
        let ranked = rank(records, SortSignal::ViewPerDay, 10);
        assert_eq!(ids(&ranked), vec!["fast", "mid", "slow"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].view_per_day >= w[1].view_per_day));
    }

    #[test]
    fn rank_sorts_by_engagement_ratio() {
        let records = vec![
            video("a", 100, 10.0, 0.05),
            video("b", 100, 90.0, 0.01),
            video("c", 100, 40.0, 0.20),
        ];
        let ranked = rank(records, SortSignal::EngagementRatio, 2);
        assert_eq!(ids(&ranked), vec!["c", "a"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let records = vec![
            video("first", 5, 7.0, 0.0),
            video("second", 5, 7.0, 0.0),
            video("third", 5, 7.0, 0.0),
        ];
        let ranked = rank(records, SortSignal::ViewCount, 3);
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_never_emits_duplicate_ids_even_without_dedupe() {
        let records = vec![
            video("a", 100, 50.0, 0.0),
            video("a", 100, 50.0, 0.0),
            video("b", 100, 40.0, 0.0),
            video("a", 100, 45.0, 0.0),
            video("c", 100, 30.0, 0.0),
        ];
        let ranked = rank(records, SortSignal::ViewPerDay, 3);
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn cap_is_respected_and_filled_when_possible() {
        let records: Vec<VideoRecord> = (0..8)
            .map(|i| video(&format!("v{i}"), i, i as f64, 0.0))
            .collect();
        assert_eq!(rank(records.clone(), SortSignal::ViewPerDay, 5).len(), 5);
        assert_eq!(rank(records.clone(), SortSignal::ViewPerDay, 20).len(), 8);
        assert!(rank(records, SortSignal::ViewPerDay, 0).is_empty());
    }
}

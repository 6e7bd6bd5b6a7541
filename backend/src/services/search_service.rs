use crate::models::{QuerySpec, SearchHit, SearchIntent, VideoRecord, VideoStatistics};
use crate::services::metrics::derive_metrics;
use crate::services::query_planner::{plan, recency_cutoff};
use crate::services::ranking::{dedupe, rank};
use crate::services::relevance::{classify_with_reason, RejectReason, Verdict};
use crate::services::youtube_gateway::{SearchGateway, SearchRequest};
use crate::utils::{
    parse_counter, parse_published_at, truncate_chars, truncate_title, CHANNEL_MAX_CHARS,
    TITLE_MAX_CHARS,
};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;

const SEARCH_ORDER: &str = "viewCount";

/// Provider parameters that stay fixed across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub region_code: String,
    pub max_results_per_query: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            region_code: "TW".to_string(),
            max_results_per_query: 8,
        }
    }
}

/// What one planned query contributed to the run.
#[derive(Debug)]
pub enum QueryOutcome {
    Fetched {
        query: String,
        records: Vec<VideoRecord>,
    },
    Skipped {
        query: String,
        reason: String,
    },
}

#[derive(Debug, Default)]
pub struct RankingRun {
    pub videos: Vec<VideoRecord>,
    pub queries_planned: usize,
    pub queries_skipped: usize,
    pub candidates: usize,
}

/// Join a search hit with its counters into a normalized record. Truncation happens
/// here and nowhere else.
pub fn normalize(hit: SearchHit, stats: Option<&VideoStatistics>) -> VideoRecord {
    let view_count = parse_counter(stats.and_then(|s| s.view_count.as_deref()));
    let like_count = parse_counter(stats.and_then(|s| s.like_count.as_deref()));
    let comment_count = parse_counter(stats.and_then(|s| s.comment_count.as_deref()));

    VideoRecord {
        url: format!("https://www.youtube.com/watch?v={}", hit.video_id),
        title: truncate_title(&hit.title, TITLE_MAX_CHARS),
        channel_title: truncate_chars(&hit.channel_title, CHANNEL_MAX_CHARS),
        published_at: parse_published_at(&hit.published_at),
        video_id: hit.video_id,
        view_count,
        like_count,
        comment_count,
        thumbnail_url: hit.thumbnail_url,
        view_per_day: 0.0,
        engagement_score: 0,
        engagement_ratio: 0.0,
        engagement_rate: 0.0,
    }
}

async fn execute_query(
    gateway: &dyn SearchGateway,
    planned: &QuerySpec,
    intent: &SearchIntent,
    settings: &PipelineSettings,
    now: DateTime<Utc>,
) -> QueryOutcome {
    let request = SearchRequest {
        query: planned.query.clone(),
        category: planned.category,
        published_after: planned.published_after,
        region_code: settings.region_code.clone(),
        order: SEARCH_ORDER,
        max_results: settings.max_results_per_query,
    };

    let hits = match gateway.search(&request).await {
        Ok(hits) => hits,
        Err(e) => {
            return QueryOutcome::Skipped {
                query: planned.query.clone(),
                reason: e.to_string(),
            }
        }
    };

    let ids: Vec<String> = hits.iter().map(|h| h.video_id.clone()).collect();
    let stats = match gateway.fetch_statistics(&ids).await {
        Ok(stats) => stats,
        Err(e) => {
            return QueryOutcome::Skipped {
                query: planned.query.clone(),
                reason: e.to_string(),
            }
        }
    };
    let stats_by_id: HashMap<&str, &VideoStatistics> =
        stats.iter().map(|s| (s.video_id.as_str(), s)).collect();

    let mut rejected: HashMap<RejectReason, usize> = HashMap::new();
    let mut stale = 0usize;
    let mut records = Vec::new();

    for hit in hits {
        let stats = stats_by_id.get(hit.video_id.as_str()).copied();
        let mut record = normalize(hit, stats);

        if record
            .published_at
            .is_some_and(|published| published < planned.published_after)
        {
            stale += 1;
            continue;
        }

        match classify_with_reason(&record, intent) {
            Verdict::Accepted => {
                derive_metrics(&mut record, now);
                records.push(record);
            }
            Verdict::Rejected(reason) => *rejected.entry(reason).or_default() += 1,
        }
    }

    debug!(
        "Query '{}' ({:?}) - accepted={}, stale={}, rejected={:?}",
        planned.query,
        planned.category,
        records.len(),
        stale,
        rejected
    );

    QueryOutcome::Fetched {
        query: planned.query.clone(),
        records,
    }
}

/// Plan, fetch, classify, derive, dedupe and rank. Queries run one after another and a
/// failing query is skipped; the run itself never fails.
pub async fn search_videos_unified(
    gateway: &dyn SearchGateway,
    intent: &SearchIntent,
    settings: &PipelineSettings,
    now: DateTime<Utc>,
) -> RankingRun {
    let queries = plan(intent, now);
    let start = std::time::Instant::now();

    let mut candidates: Vec<VideoRecord> = Vec::new();
    let mut queries_skipped = 0;

    for planned in &queries {
        match execute_query(gateway, planned, intent, settings, now).await {
            QueryOutcome::Fetched { query, records } => {
                debug!("Query '{}' contributed {} records", query, records.len());
                candidates.extend(records);
            }
            QueryOutcome::Skipped { query, reason } => {
                warn!("Skipping query '{}': {}", query, reason);
                queries_skipped += 1;
            }
        }
    }

    let candidate_count = candidates.len();
    let videos = rank(dedupe(candidates), intent.sort_by, intent.limit);

    info!(
        "Ranking run completed - window_start={}, queries={}, skipped={}, candidates={}, returned={}, sort_by={}, duration={:.2}s",
        recency_cutoff(intent.window_hours, now).to_rfc3339(),
        queries.len(),
        queries_skipped,
        candidate_count,
        videos.len(),
        intent.sort_by,
        start.elapsed().as_secs_f32()
    );

    RankingRun {
        videos,
        queries_planned: queries.len(),
        queries_skipped,
        candidates: candidate_count,
    }
}

/// Rank videos for `intent` as of now.
pub async fn run(
    gateway: &dyn SearchGateway,
    intent: &SearchIntent,
    settings: &PipelineSettings,
) -> Vec<VideoRecord> {
    search_videos_unified(gateway, intent, settings, Utc::now())
        .await
        .videos
}

use crate::models::{ErrorResponse, RankedVideo, RankingResponse, SearchIntent, Topic, VideoRecord};
use crate::services::search_service::search_videos_unified;
use crate::utils::{format_compact_count, parse_sort_signal};
use crate::AppState;
use chrono::Utc;
use rocket::serde::json::Json;
use rocket::{get, State};

const MAX_WINDOW_HOURS: u32 = 720;
const MAX_LIMIT: usize = 50;

/// Attach 1-based positions and display counters to ranked records.
pub fn to_ranked(videos: Vec<VideoRecord>) -> Vec<RankedVideo> {
    videos
        .into_iter()
        .enumerate()
        .map(|(i, video)| RankedVideo {
            rank: i + 1,
            views_display: format_compact_count(video.view_count),
            likes_display: format_compact_count(video.like_count),
            video,
        })
        .collect()
}

fn bad_request(message: String) -> ErrorResponse {
    ErrorResponse {
        error: "Invalid query parameter".to_string(),
        message,
    }
}

#[allow(clippy::too_many_arguments)]
#[get("/?<hours>&<limit>&<sort>&<topic>&<education>&<etf_filter>&<region_filter>")]
pub async fn get_ranking(
    hours: Option<u32>,
    limit: Option<usize>,
    sort: Option<String>,
    topic: Option<String>,
    education: Option<bool>,
    etf_filter: Option<bool>,
    region_filter: Option<bool>,
    state: &State<AppState>,
) -> Result<Json<RankingResponse>, ErrorResponse> {
    let sort_by = parse_sort_signal(sort.as_deref()).map_err(bad_request)?;
    let topic = match topic.as_deref() {
        None | Some("") => None,
        Some(t) => Some(t.parse::<Topic>().map_err(bad_request)?),
    };

    let intent = SearchIntent {
        window_hours: hours
            .unwrap_or(state.default_window_hours)
            .clamp(1, MAX_WINDOW_HOURS),
        limit: limit.unwrap_or(state.default_limit).clamp(1, MAX_LIMIT),
        filter_etf: etf_filter.unwrap_or(true),
        filter_taiwan_chinese: region_filter.unwrap_or(true),
        topic,
        sort_by,
        education_mode: education.unwrap_or(false),
    };

    let run =
        search_videos_unified(state.gateway.as_ref(), &intent, &state.settings, Utc::now()).await;

    Ok(Json(RankingResponse {
        title: intent.title(),
        sort_by: intent.sort_by,
        videos: to_ranked(run.videos),
        queries_planned: run.queries_planned,
        queries_skipped: run.queries_skipped,
        candidates: run.candidates,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortSignal;
    use crate::services::search_service::testing::FakeGateway;
    use crate::test_client;
    use chrono::{Duration, SecondsFormat};
    use rocket::http::Status;

    fn hours_ago(hours: i64) -> String {
        (Utc::now() - Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn gateway() -> FakeGateway {
        FakeGateway::default()
            .with_video("台灣ETF", "a1", "0050 ETF 投資入門", "理財小達人", &hours_ago(30), "1200")
            .with_video("台灣ETF", "a2", "00878 ETF 配息分析", "存股日記", &hours_ago(6), "3400")
            .with_video("ETF投資", "a1", "0050 ETF 投資入門", "理財小達人", &hours_ago(30), "1200")
    }

    #[test]
    fn ranking_returns_positions_and_display_counts() {
        let client = test_client(gateway());
        let response = client.get("/api/ranking?hours=48&limit=5").dispatch();
        assert_eq!(response.status(), Status::Ok);

        let body: RankingResponse = response.into_json().expect("ranking json");
        assert_eq!(body.title, "48小時內ETF熱門影片");
        assert_eq!(body.sort_by, SortSignal::ViewPerDay);
        assert_eq!(body.queries_planned, 8);
        assert_eq!(body.queries_skipped, 6);
        assert_eq!(body.candidates, 3);

        let ids: Vec<&str> = body.videos.iter().map(|v| v.video.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);
        assert_eq!(body.videos[0].rank, 1);
        assert_eq!(body.videos[0].views_display, "3.4K");
        assert_eq!(body.videos[1].rank, 2);
    }

    #[test]
    fn unknown_sort_is_a_bad_request() {
        let client = test_client(gateway());
        let response = client.get("/api/ranking?sort=likes").dispatch();
        assert_eq!(response.status(), Status::BadRequest);

        let body: ErrorResponse = response.into_json().expect("error json");
        assert!(body.message.contains("likes"));
    }

    #[test]
    fn unknown_topic_is_a_bad_request() {
        let client = test_client(gateway());
        let response = client.get("/api/ranking?topic=crypto").dispatch();
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[test]
    fn limit_is_clamped_into_range() {
        let client = test_client(gateway());
        let body: RankingResponse = client
            .get("/api/ranking?limit=0")
            .dispatch()
            .into_json()
            .expect("ranking json");
        assert_eq!(body.videos.len(), 1);
    }

    #[test]
    fn topic_changes_the_title() {
        let client = test_client(FakeGateway::default());
        let body: RankingResponse = client
            .get("/api/ranking?topic=dividend&hours=168&sort=engagement_score")
            .dispatch()
            .into_json()
            .expect("ranking json");
        assert_eq!(body.title, "一週內高股息ETF互動排行");
        assert!(body.videos.is_empty());
        assert_eq!(body.queries_skipped, body.queries_planned);
    }
}

use crate::models::{SearchHit, VideoCategory, VideoStatistics};
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Parse(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::Parse(err.to_string())
    }
}

/// Parameters of one provider search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub category: Option<VideoCategory>,
    pub published_after: DateTime<Utc>,
    pub region_code: String,
    pub order: &'static str,
    pub max_results: u32,
}

/// The video-search provider as the pipeline sees it.
#[rocket::async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;

    /// Counters for the given IDs. IDs unknown to the provider are simply absent.
    async fn fetch_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatistics>>;
}

// YouTube Data API v3 payloads. Only the fields the pipeline reads are modelled.

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    channel_title: String,
    published_at: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

impl Thumbnails {
    fn best_url(self) -> String {
        self.high
            .or(self.medium)
            .or(self.default)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

fn parse_search_hits(body: &str) -> Result<Vec<SearchHit>> {
    let response: ListResponse<SearchItem> = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            // channels and playlists can slip into results without a videoId
            let video_id = item.id.video_id?;
            Some(SearchHit {
                video_id,
                title: item.snippet.title,
                channel_title: item.snippet.channel_title,
                published_at: item.snippet.published_at,
                thumbnail_url: item.snippet.thumbnails.best_url(),
            })
        })
        .collect())
}

fn parse_statistics(body: &str) -> Result<Vec<VideoStatistics>> {
    let response: ListResponse<VideoItem> = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .map(|item| VideoStatistics {
            video_id: item.id,
            view_count: item.statistics.view_count,
            like_count: item.statistics.like_count,
            comment_count: item.statistics.comment_count,
        })
        .collect())
}

pub struct YouTubeGateway {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeGateway {
    pub fn new(api_key: String, base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.base_url.join(endpoint)?;
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(
            "YouTube {} request completed - duration={:.2}s, bytes={}",
            endpoint,
            start.elapsed().as_secs_f32(),
            body.len()
        );
        Ok(body)
    }
}

#[rocket::async_trait]
impl SearchGateway for YouTubeGateway {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        // Documentation: https://developers.google.com/youtube/v3/docs/search/list
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("q", request.query.clone()),
            ("order", request.order.to_string()),
            (
                "publishedAfter",
                request
                    .published_after
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("regionCode", request.region_code.clone()),
            ("maxResults", request.max_results.to_string()),
        ];
        if let Some(category) = request.category {
            params.push(("videoCategoryId", category.id().to_string()));
        }

        let body = self.get("search", &params).await?;
        parse_search_hits(&body)
    }

    async fn fetch_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatistics>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
        let params = [("part", "statistics".to_string()), ("id", ids.join(","))];
        let body = self.get("videos", &params).await?;
        parse_statistics(&body)
    }
}

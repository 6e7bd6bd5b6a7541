use chrono::{DateTime, Utc};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::{response, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

/// One provider video, normalized once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub url: String,
    pub thumbnail_url: String,
    // derived, see services::metrics
    pub view_per_day: f64,
    pub engagement_score: u64,
    pub engagement_ratio: f64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Active,
    MultiAsset,
    MarketCap,
    Dividend,
    ChinaExposure,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Active,
        Topic::MultiAsset,
        Topic::MarketCap,
        Topic::Dividend,
        Topic::ChinaExposure,
    ];

    /// Slugs and Chinese words that name this topic in queries and chat messages.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Topic::Active => &["active", "主動式", "主動"],
            Topic::MultiAsset => &["multi_asset", "allocation", "多資產", "配置"],
            Topic::MarketCap => &["market_cap", "市值型", "市值"],
            Topic::Dividend => &["dividend", "高股息"],
            Topic::ChinaExposure => &["china_exposure", "china", "陸股", "中國"],
        }
    }

    /// Label shown in ranking titles.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Active => "主動式ETF",
            Topic::MultiAsset => "多資產配置ETF",
            Topic::MarketCap => "市值型ETF",
            Topic::Dividend => "高股息ETF",
            Topic::ChinaExposure => "陸股ETF",
        }
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Topic::ALL
            .into_iter()
            .find(|topic| topic.aliases().contains(&needle.as_str()))
            .ok_or_else(|| format!("unknown topic '{needle}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSignal {
    ViewPerDay,
    EngagementRatio,
    ViewCount,
    EngagementScore,
}

impl FromStr for SortSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_per_day" | "velocity" => Ok(SortSignal::ViewPerDay),
            "engagement_ratio" => Ok(SortSignal::EngagementRatio),
            "view_count" | "views" => Ok(SortSignal::ViewCount),
            "engagement_score" | "engagement" => Ok(SortSignal::EngagementScore),
            other => Err(format!("unknown sort signal '{other}'")),
        }
    }
}

impl fmt::Display for SortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortSignal::ViewPerDay => "view_per_day",
            SortSignal::EngagementRatio => "engagement_ratio",
            SortSignal::ViewCount => "view_count",
            SortSignal::EngagementScore => "engagement_score",
        };
        f.write_str(name)
    }
}

/// One ranking request. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    pub window_hours: u32,
    pub limit: usize,
    pub filter_etf: bool,
    pub filter_taiwan_chinese: bool,
    pub topic: Option<Topic>,
    pub sort_by: SortSignal,
    pub education_mode: bool,
}

impl Default for SearchIntent {
    fn default() -> Self {
        Self {
            window_hours: 48,
            limit: 10,
            filter_etf: true,
            filter_taiwan_chinese: true,
            topic: None,
            sort_by: SortSignal::ViewPerDay,
            education_mode: false,
        }
    }
}

impl SearchIntent {
    /// Human readable title for the ranking, e.g. "48小時內高股息ETF熱門影片".
    pub fn title(&self) -> String {
        let window = match self.window_hours {
            168 => "一週內".to_string(),
            h => format!("{h}小時內"),
        };
        let subject = if self.education_mode {
            "ETF教學".to_string()
        } else {
            self.topic.map(|t| t.label()).unwrap_or("ETF").to_string()
        };
        let signal = match self.sort_by {
            SortSignal::ViewPerDay | SortSignal::ViewCount => "熱門影片",
            SortSignal::EngagementRatio | SortSignal::EngagementScore => "互動排行",
        };
        format!("{window}{subject}{signal}")
    }
}

/// Provider content categories used by the education ranking variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCategory {
    NewsPolitics,
    Education,
}

impl VideoCategory {
    pub fn id(&self) -> &'static str {
        match self {
            VideoCategory::NewsPolitics => "25",
            VideoCategory::Education => "27",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub query: String,
    pub category: Option<VideoCategory>,
    pub published_after: DateTime<Utc>,
}

/// Snippet fields of one provider search result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHit {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail_url: String,
}

/// Raw counters as reported by the provider, still strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStatistics {
    pub video_id: String,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVideo {
    pub rank: usize,
    pub views_display: String,
    pub likes_display: String,
    #[serde(flatten)]
    pub video: VideoRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankingResponse {
    pub title: String,
    pub sort_by: SortSignal,
    pub videos: Vec<RankedVideo>,
    pub queries_planned: usize,
    pub queries_skipped: usize,
    pub candidates: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Greeting,
    Help,
    Ranking,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub kind: CommandKind,
    pub title: Option<String>,
    pub message: Option<String>,
    pub videos: Vec<RankedVideo>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(Status::BadRequest)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

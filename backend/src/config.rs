use crate::services::search_service::PipelineSettings;
use crate::services::youtube_gateway::{SearchGateway, YouTubeGateway};
use crate::AppState;
use anyhow::{Context, Result};
use env_logger::{Builder, Env};
use log::info;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3/";
/// search.list rejects a larger maxResults.
const PROVIDER_MAX_RESULTS: u32 = 50;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub youtube_api_base: Url,
    pub region_code: String,
    pub max_results_per_query: u32,
    pub http_timeout_secs: u64,
    pub default_window_hours: u32,
    pub default_result_limit: usize,
    pub cors_allowed_origin: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_number<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn max_results_per_query() -> u32 {
    env_number("YOUTUBE_MAX_RESULTS", 8).clamp(1, PROVIDER_MAX_RESULTS)
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let youtube_api_key = env::var("YOUTUBE_API_KEY")
            .context("YOUTUBE_API_KEY environment variable must be set")?;

        let mut base = env_or("YOUTUBE_API_BASE", DEFAULT_API_BASE);
        // Url::join drops the last path segment unless the base ends with a slash
        if !base.ends_with('/') {
            base.push('/');
        }
        let youtube_api_base =
            Url::parse(&base).with_context(|| format!("invalid YOUTUBE_API_BASE '{base}'"))?;

        Ok(Self {
            youtube_api_key,
            youtube_api_base,
            region_code: env_or("YOUTUBE_REGION_CODE", "TW"),
            max_results_per_query: max_results_per_query(),
            http_timeout_secs: env_number("YOUTUBE_HTTP_TIMEOUT_SECS", 10),
            default_window_hours: env_number("DEFAULT_WINDOW_HOURS", 48),
            default_result_limit: env_number("DEFAULT_RESULT_LIMIT", 10),
            cors_allowed_origin: env_or("CORS_ALLOWED_ORIGIN", "http://localhost:8080"),
        })
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            region_code: self.region_code.clone(),
            max_results_per_query: self.max_results_per_query,
        }
    }
}

pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting ETF video ranker...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_gateway(config: &AppConfig) -> Result<Arc<dyn SearchGateway>> {
    info!("Using YouTube Data API at: {}", config.youtube_api_base);

    let gateway = YouTubeGateway::new(
        config.youtube_api_key.clone(),
        config.youtube_api_base.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )
    .context("Failed to build YouTube HTTP client")?;

    Ok(Arc::new(gateway))
}

pub fn create_app_state(config: &AppConfig) -> Result<AppState> {
    Ok(AppState {
        gateway: create_gateway(config)?,
        settings: config.pipeline_settings(),
        default_window_hours: config.default_window_hours,
        default_limit: config.default_result_limit,
    })
}

pub fn create_cors(origin: &str) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[origin]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

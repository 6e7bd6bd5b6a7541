pub mod command;
pub mod keywords;
pub mod metrics;
pub mod query_planner;
pub mod ranking;
pub mod relevance;
pub mod search_service;
pub mod youtube_gateway;

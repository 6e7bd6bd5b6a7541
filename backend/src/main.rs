#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::config::{create_app_state, create_cors, init_logger, load_environment, AppConfig};
use crate::services::search_service::PipelineSettings;
use crate::services::youtube_gateway::SearchGateway;
use anyhow::Result;
use std::sync::Arc;

pub struct AppState {
    pub gateway: Arc<dyn SearchGateway>,
    pub settings: PipelineSettings,
    pub default_window_hours: u32,
    pub default_limit: usize,
}

fn build_rocket(state: AppState, cors: rocket_cors::Cors) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(state)
        .attach(cors)
        .mount("/api/ranking", routes![api::get_ranking])
        .mount("/api/command", routes![api::post_command])
        .mount("/api/health", routes![api::health::health])
}

#[rocket::main]
async fn main() -> Result<()> {
    load_environment();
    init_logger();

    let config = AppConfig::from_env()?;
    let cors = create_cors(&config.cors_allowed_origin)?;
    let state = create_app_state(&config)?;

    build_rocket(state, cors)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {}", e))?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_client(
    gateway: crate::services::search_service::testing::FakeGateway,
) -> rocket::local::blocking::Client {
    let state = AppState {
        gateway: Arc::new(gateway),
        settings: PipelineSettings::default(),
        default_window_hours: 48,
        default_limit: 10,
    };
    let cors = create_cors("http://localhost:8080").expect("cors");
    rocket::local::blocking::Client::tracked(build_rocket(state, cors)).expect("valid rocket")
}

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::community_service::CommunityService;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::seed::seed_demo_posts;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repo = InMemoryPostRepository::new();
    if settings.seed_demo_posts {
        seed_demo_posts(&repo, Utc::now()).await?;
    }

    let community_service = Arc::new(CommunityService::new(repo));
    let state = AppState::new(community_service, settings.featured_defaults());

    info!(
        window_hours = settings.featured_window_hours,
        limit = settings.featured_limit,
        "community server starting"
    );
    server::run_http(&settings, state).await
}

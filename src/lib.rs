pub mod api;
pub mod augment;
pub mod communities;
pub mod config;
pub mod crawler;
pub mod error;
pub mod openai;
pub mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tracing::info;

use crate::communities::CommunityPage;
use crate::config::AppConfig;
use crate::openai::CompletionClient;
use crate::rate_limit::DailyQuota;

/// Shared per-process state: one HTTP client for all outbound calls, the
/// completion client, the daily quota table, and the keyword-trigger
/// table driving crawls and reply links.
pub struct AppState {
    pub http: reqwest::Client,
    pub completion: CompletionClient,
    pub quota: DailyQuota,
    pub pages: Vec<CommunityPage>,
    pub crawl_timeout: Duration,
    pub allowed_origin: String,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            completion: CompletionClient::new(
                http.clone(),
                cfg.openai_base_url.clone(),
                cfg.openai_api_key.clone(),
                cfg.model.clone(),
                cfg.max_tokens,
                Duration::from_millis(cfg.completion_timeout_ms),
            ),
            quota: DailyQuota::new(cfg.rate_limit_per_day),
            pages: communities::default_pages(),
            crawl_timeout: Duration::from_millis(cfg.crawl_timeout_ms),
            allowed_origin: cfg.allowed_origin.clone(),
            http,
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(addr = %listener.local_addr()?, "listening");

    // Peer addresses feed the rate limiter when no forwarded-for header
    // is present.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

use std::sync::Arc;

use tracing::info;

use realty_concierge::config::AppConfig;
use realty_concierge::{build_app, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = AppConfig::from_env()?;
    info!(
        model = %cfg.model,
        port = cfg.port,
        rate_limit_per_day = cfg.rate_limit_per_day,
        "starting realty concierge service"
    );

    let state = Arc::new(AppState::from_config(&cfg));
    let app = build_app(state);
    run_server(app, cfg.port).await?;
    Ok(())
}

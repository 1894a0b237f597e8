use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common_games::{
    config::Config,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "common_games=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        account = %config.steam_account,
        demo_mode = config.demo_mode,
        max_concurrent_fetches = config.max_concurrent_fetches,
        request_timeout_secs = config.request_timeout_secs,
        "Starting common-games"
    );

    // Initialize application state
    let state = AppState::from_config(&config).await?;

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

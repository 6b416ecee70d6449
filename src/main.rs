use std::sync::Arc;

use deals_api::{
    config::Config,
    db,
    mail::{Mailer, SmtpMailer},
    routes::{create_router, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Fatal before any connection attempt; names every missing variable
    config.require_db()?;

    let pool = db::create_pool(&config);

    // Fail-fast gate: runs exactly once, never retried
    if let Err(err) = db::verify_connection(&pool).await {
        tracing::error!(error = %err, "Database connection failed");
        tracing::error!(error = ?err, "Full error");
        std::process::exit(1);
    }

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config));
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        pool,
        mailer,
        config,
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

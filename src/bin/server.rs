use trackten::{
    config::AppConfig,
    db::connection::DbConnection,
    prelude::*,
    web::{AppState, app},
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_PKG_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::debug!("Loaded {config:?}");
    if config.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set: the admin section is open and admin login is disabled");
    }

    let connection = DbConnection::new(&config.database_url)?.setup()?;
    let state = AppState::new(&config, connection)?;
    let router = app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

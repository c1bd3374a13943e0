mod api;
mod middleware;

use std::sync::Arc;

use mailscout_engine::Waterfall;
use mailscout_providers::{HttpSettings, ProviderRegistry};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mailscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let registry = ProviderRegistry::standard(&HttpSettings::from_app_config(&config))?;
    let engine = Waterfall::from_config(registry, &config);
    tracing::info!(
        bind_addr = %config.bind_addr,
        provider_order = ?config.provider_order,
        credentials = ?config.credentials,
        "starting mailscout server"
    );

    let app = build_app(AppState {
        engine: Arc::new(engine),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

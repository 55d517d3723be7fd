use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use tunes::adapters::http::{app_router, Adapters, AppState};
use tunes::adapters::memory::InMemoryDatabase;
use tunes::application::handlers::auth::spawn_session_sweeper;
use tunes::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let adapters = match &config.database {
        Some(database) => {
            let pool = database.connect().await?;
            if database.run_migrations {
                sqlx::migrate!().run(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            tracing::info!(max_connections = database.max_connections, "Using PostgreSQL storage");
            Adapters::postgres(pool)
        }
        None => {
            tracing::warn!("No database configured, using in-memory storage");
            Adapters::in_memory(InMemoryDatabase::new())
        }
    };

    let sweeper = config
        .auth
        .sweep_interval()
        .map(|interval| spawn_session_sweeper(adapters.sessions.clone(), interval));

    let state = AppState::new(adapters, &config);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        serialize_recompute = config.reviews.serialize_recompute,
        rollback_on_recompute_failure = config.reviews.rollback_on_recompute_failure,
        "Starting server"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

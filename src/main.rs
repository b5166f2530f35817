use std::sync::Arc;

use anyhow::{Context, Result};
use todo_lists::{
    build_router,
    config::{AppConfig, StoreBackend},
    repository::{InMemoryTodoListRepository, MongoTodoListRepository, TodoListRepository},
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let repository: Arc<dyn TodoListRepository> = match config.store_backend {
        StoreBackend::MongoDb => {
            info!(database = %config.mongodb_database, "store backend: mongodb");
            let repo =
                MongoTodoListRepository::connect(&config.mongodb_uri, &config.mongodb_database)
                    .await
                    .context("failed to configure MongoDB client")?;
            Arc::new(repo)
        }
        StoreBackend::Memory => {
            info!("store backend: in-memory");
            Arc::new(InMemoryTodoListRepository::new())
        }
    };

    repository
        .init()
        .await
        .context("failed to reach the document store")?;

    let app =
        build_router(AppState::new(repository.clone()).with_public_dir(&config.public_dir));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    repository.shutdown().await;
    info!("server stopped");

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_lists=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

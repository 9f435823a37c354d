//! TestDeck Server — hierarchical test case management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use testdeck_core::config::AppConfig;
use testdeck_core::error::AppError;
use testdeck_database::DatabasePool;
use testdeck_database::repositories::{CaseRepository, FolderRepository};
use testdeck_service::{CaseService, CatalogService, FolderService, TreeService, VersionService};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TESTDECK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TestDeck v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let database = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    testdeck_database::migration::run_migrations(database.pool()).await?;
    tracing::info!("Database migrations complete");

    let db_pool = database.into_pool();

    // ── Step 2: Initialize repositories ──────────────────────────
    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
    let case_repo = Arc::new(CaseRepository::new(db_pool.clone()));

    // ── Step 3: Initialize services ──────────────────────────────
    let folder_service = Arc::new(FolderService::new(Arc::clone(&folder_repo)));
    let case_service = Arc::new(CaseService::new(
        Arc::clone(&case_repo),
        Arc::clone(&folder_repo),
    ));
    let version_service = Arc::new(VersionService::new(Arc::clone(&case_repo)));
    let tree_service = Arc::new(TreeService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&case_repo),
    ));

    // ── Step 4: Catalog command surface ──────────────────────────
    let catalog = Arc::new(CatalogService::new(
        Arc::clone(&folder_service),
        Arc::clone(&case_service),
        Arc::clone(&version_service),
        Arc::clone(&tree_service),
    ));

    // ── Step 5: Application state + router ───────────────────────
    let state = testdeck_api::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        folder_service,
        case_service,
        version_service,
        catalog,
    };

    let app = testdeck_api::build_router(state);

    // ── Step 6: Serve with graceful shutdown ─────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("TestDeck server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 7: Drain the connection pool ────────────────────────
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, db_pool.close()).await;

    tracing::info!("TestDeck server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

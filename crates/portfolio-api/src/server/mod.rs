//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use portfolio_common::{AppConfig, AppError};
use portfolio_core::FingerprintSalt;
use portfolio_db::{create_pool, run_migrations, PgPostRepository, PgReactionRepository};
use portfolio_service::{spawn_reconciler, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
/// Health probes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    health_routes().merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = portfolio_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let salt = match config.reactions.fingerprint_salt.as_deref() {
        Some(salt) => FingerprintSalt::new(salt),
        None => {
            warn!("FINGERPRINT_SALT is not set; viewer fingerprints use the built-in default salt");
            FingerprintSalt::default()
        }
    };

    // Create repositories
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .post_repo(post_repo)
        .reaction_repo(reaction_repo)
        .fingerprint_salt(salt)
        .storage_public_base_url(config.storage.public_base_url.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    // Peer addresses feed viewer fingerprints and the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(AppError::internal)?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let reconcile_every = config.reactions.reconcile_interval_secs;

    // Create app state
    let state = create_app_state(config).await?;

    if reconcile_every > 0 {
        spawn_reconciler(
            state.shared_service_context(),
            Duration::from_secs(reconcile_every),
        );
    }

    // Build application
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        () = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

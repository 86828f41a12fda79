use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uwlink_auth::TokenKeys;

// Re-export shared types from uwlink-types
pub use uwlink_types::*;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;

use config::Config;
use database::setup_database;
use error::{AppError, Result};

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub token_keys: TokenKeys,
}

pub async fn run_server() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // Setup database
    let db = setup_database(&config.database_url).await?;

    // Token signing keys derived from the configured secret
    let token_keys = TokenKeys::from_secret(config.jwt_secret.as_bytes());

    // Extract config values before moving state
    let server_address = config.server_address.clone();

    // Create application state
    let state = AppState {
        db,
        config,
        token_keys,
    };

    // Build the application router
    let app = create_app(state);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&server_address)
        .await
        .map_err(|e| {
            AppError::ServerError(format!("Failed to bind to {}: {}", server_address, e))
        })?;

    tracing::info!("🚀 uwlink backend server starting on {}", server_address);

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::ServerError(format!("Server error: {}", e)))?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Account operations
        .route(
            "/owners",
            post(handlers::signup).get(handlers::get_all_owners),
        )
        .route("/owners/:owner_id", get(handlers::get_owner))
        .route("/login", post(handlers::login))
        // Pet operations
        .route(
            "/pets",
            get(handlers::get_all_pets).post(handlers::create_pet),
        )
        .route("/pets/:pet_id", get(handlers::get_pet))
        // Health check
        .route("/health", get(handlers::health_check))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

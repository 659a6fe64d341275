//! # CodeConnect API
//!
//! The web server for CodeConnect's scheduling core: mentor availability
//! slots and booked sessions with their join-button state.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into store operations
//! - **Middleware**: Error-to-HTTP mapping
//! - **Config**: Handle environment and application configuration
//!
//! Business rules live in `codeconnect-core`; persistence in `codeconnect-db`.

/// Configuration module for API settings
pub mod config;
/// Extractors that report rejections as JSON errors
pub mod extract;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use codeconnect_core::{
    repositories::{BookingRepository, SlotRepository},
    BookingStore, Clock, OverlapPolicy, SlotStore, SystemClock,
};
use codeconnect_db::{DbPool, PgBookingRepository, PgSlotRepository};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Mentor availability slots
    pub slots: SlotStore,
    /// Booked sessions
    pub bookings: BookingStore,
    /// Source of "now" for join-window evaluation
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(
        slot_repo: Arc<dyn SlotRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        overlap_policy: OverlapPolicy,
    ) -> Self {
        Self {
            slots: SlotStore::new(slot_repo).with_overlap_policy(overlap_policy),
            bookings: BookingStore::new(booking_repo),
            clock,
        }
    }

    /// State backed by PostgreSQL and the wall clock.
    pub fn with_pool(db_pool: DbPool, overlap_policy: OverlapPolicy) -> Self {
        Self::new(
            Arc::new(PgSlotRepository::new(db_pool.clone())),
            Arc::new(PgBookingRepository::new(db_pool)),
            Arc::new(SystemClock),
            overlap_policy,
        )
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes, panic recovery and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Mentor schedule endpoints
        .merge(routes::schedule::routes())
        // Booking endpoints
        .merge(routes::bookings::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(CatchPanicLayer::custom(middleware::error_handling::handle_panic))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid origin in API_CORS_ORIGINS")?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = codeconnect_api::config::ApiConfig::from_env()?;
/// let db_pool = codeconnect_db::create_pool(&config.database_url, config.max_connections).await?;
/// codeconnect_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let state = Arc::new(ApiState::with_pool(db_pool, config.overlap_policy()));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (overlap policy: {:?})",
        addr,
        config.overlap_policy()
    );
    axum::serve(listener, app).await?;

    Ok(())
}

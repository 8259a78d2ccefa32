pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post},
    Router,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use review_core::{RngSource, ScheduleCache};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub type DrillRng = RngSource<ChaCha8Rng>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schedules: Arc<RwLock<ScheduleCache<String>>>,
    pub rng: Arc<Mutex<DrillRng>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rng = match config.drill_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            schedules: Arc::new(RwLock::new(ScheduleCache::new(config.schedule_cache_capacity))),
            rng: Arc::new(Mutex::new(RngSource(rng))),
            config: Arc::new(config),
        }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Review routes
        .route("/review", post(routes::review::submit))
        // Schedule routes
        .route("/schedule", post(routes::schedule::build))
        .route("/schedule/due-today", get(routes::schedule::due_today))
        .route("/schedule/due-this-week", get(routes::schedule::due_this_week))
        // Analytics routes
        .route("/load", post(routes::analytics::load))
        .route("/retention", post(routes::analytics::retention))
        .route("/trend", post(routes::analytics::trend))
        // Daily drill routes
        .route("/daily-drill", post(routes::drill::select))
        .route("/daily-drill/status", post(routes::drill::status))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        algorithm = config.default_algorithm.as_str(),
        seeded = config.drill_seed.is_some(),
        cache_capacity = config.schedule_cache_capacity,
        "Loaded configuration"
    );

    let addr = config.bind_addr();
    let app = build_router(AppState::new(config))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

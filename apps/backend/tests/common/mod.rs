//! Common test utilities and fixtures for integration tests.
//!
//! The service keeps no external state, so every test builds its own router
//! with a seeded drill RNG and an empty schedule cache.

#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use review_scheduler_backend::config::Config;
use review_scheduler_backend::{build_router, AppState};

/// Test context holding the router under test.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a new test context with a fixed drill seed.
    pub fn new() -> Self {
        Self::with_config(Config {
            drill_seed: Some(7),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config);
        let app = build_router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

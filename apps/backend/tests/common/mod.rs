//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory store and fixture deck
//! - Identity header helpers

pub mod fixtures;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;

use radres_backend::config::Config;
use radres_backend::services::deck::deck_from_text;
use radres_backend::services::storage::{KvStore, MemoryStore};
use radres_backend::{build_router, AppState};

pub const TEST_PIN: &str = "4321";

/// Test context holding the store behind a router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    /// Create a context serving `num_cards` fixture cards.
    pub fn new(num_cards: usize) -> Self {
        Self::with_deck(&fixtures::sample_deck(num_cards))
    }

    /// Create a context serving the cards of a TOON batch.
    pub fn with_deck(deck_text: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = Config {
            emergency_pin: TEST_PIN.to_string(),
            ..Config::default()
        };

        let state = AppState {
            store: store.clone(),
            deck: Arc::new(deck_from_text(deck_text)),
            config: Arc::new(config),
        };

        Self {
            store,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Seed a raw value into the store.
    pub fn seed(&self, key: &str, value: &str) {
        self.store.put(key, value.to_string()).unwrap();
    }

    /// Access-proxy identity header.
    pub fn email_header(email: &str) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("cf-access-authenticated-user-email"),
            HeaderValue::from_str(email).unwrap(),
        )
    }

    /// Shared PIN header.
    pub fn pin_header(pin: &str) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("x-radres-pin"),
            HeaderValue::from_str(pin).unwrap(),
        )
    }
}

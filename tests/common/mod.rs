//! Common test utilities for Prism
//!
//! Shared fixtures for building a test server wired to mock providers.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use prism::{routes::create_router, AppState, Config};

use crate::mocks::MockProviders;

/// Test configuration constants
pub mod constants {
    pub const TEST_API_KEY: &str = "test-api-key";
    pub const TEST_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
    pub const TEST_USER_MESSAGE: &str = "Hello, how are you?";
}

/// Configuration pointing HuggingFace rewrites at the mock router
pub fn test_config(providers: &MockProviders) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        huggingface_router_url: providers.huggingface_router_url(),
        ..Config::default()
    }
}

/// Test server running the real router
pub fn test_server(providers: &MockProviders) -> TestServer {
    let state = AppState::new(test_config(providers)).expect("Failed to create app state");
    TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server")
}

/// Minimal gateway request body
pub fn chat_body(endpoint: &str, model: &str) -> Value {
    json!({
        "apiKey": constants::TEST_API_KEY,
        "endpointUrl": endpoint,
        "model": model,
        "systemPrompt": constants::TEST_SYSTEM_PROMPT,
        "history": [],
        "userMessage": constants::TEST_USER_MESSAGE,
        "stealthMode": false
    })
}

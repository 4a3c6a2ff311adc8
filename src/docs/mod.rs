//! API Documentation module
//!
//! Provides OpenAPI specification generation for the gateway API using utoipa.

mod openapi;

pub use openapi::GatewayApiDoc;

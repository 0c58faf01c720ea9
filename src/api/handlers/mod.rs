pub mod arguments;
pub mod faults;
pub mod files;
pub mod headers;
pub mod payloads;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

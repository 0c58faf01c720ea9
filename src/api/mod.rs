// API layer module (adapters for controllers)
// Handlers receive already-validated typed input and echo it back

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod validation;

use axum::http::StatusCode;

use crate::api::errors::ApiError;
use crate::api::validation::ValidatedPath;

/// Fail the request with the caller-chosen status code
///
/// GET /error/:status_code
///
/// Exercises the error propagation path and carries no other logic. Any
/// integer is accepted; codes the HTTP layer cannot represent (outside
/// 100-999) surface as a 500 naming the rejected value.
pub async fn raise_status(ValidatedPath(status_code): ValidatedPath<i64>) -> ApiError {
    let status = u16::try_from(status_code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok());

    match status {
        Some(status) => ApiError::new(status, "error lives here"),
        None => ApiError::internal_server_error(format!(
            "status code {status_code} is outside the representable range"
        )),
    }
}

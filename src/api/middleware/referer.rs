use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::REFERER, request::Parts},
};

use crate::api::errors::ApiError;
use crate::config::{load_reference, AppState};

/// Referer pre-check extractor for guarded routes
///
/// Runs before the handler body: reads the `referer` header, loads the
/// header reference file (fresh on every invocation, no caching) and
/// compares the two exactly and case-sensitively. On mismatch the request
/// aborts with 400 and the handler never executes. A missing or corrupt
/// reference file propagates as a 500 with no fallback.
///
/// Usage:
/// ```rust
/// use routebook_api::api::middleware::referer::RefererGuard;
/// use axum::Json;
///
/// async fn guarded_handler(_guard: RefererGuard) -> Json<bool> {
///     Json(true)
/// }
/// ```
pub struct RefererGuard;

#[async_trait]
impl<S> FromRequestParts<S> for RefererGuard
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // The guard's own declared input: one required header
        let referer = parts
            .headers
            .get(REFERER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unprocessable_entity("missing required header `referer`"))?;

        let state = AppState::from_ref(state);
        let reference = load_reference(&state.settings_path)?;

        if reference.referer != referer {
            return Err(ApiError::bad_request("text different from file"));
        }

        Ok(RefererGuard)
    }
}

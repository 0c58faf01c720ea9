use axum::{extract::State, http::HeaderMap, Json};

use crate::api::errors::ApiError;
use crate::api::middleware::referer::RefererGuard;
use crate::api::validation::{optional_header, require_header};
use crate::config::{load_reference, AppState};

/// Compare request headers against the persisted reference
///
/// POST /headers/
///
/// Returns a bare boolean: true iff the `referer` header equals the
/// configured value AND `x-api-key` is non-empty and all digits. A
/// non-digit key is an ordinary `false`, never a validation failure.
pub async fn check_headers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<bool>, ApiError> {
    let api_key = require_header(&headers, "x-api-key")?;
    let referer = optional_header(&headers, "referer");

    let reference = load_reference(&state.settings_path)?;

    let matches = referer.as_deref() == Some(reference.referer.as_str()) && is_all_digits(&api_key);

    Ok(Json(matches))
}

/// Report that the referer pre-check passed
///
/// POST /dep/
///
/// The guard runs first and aborts the request on mismatch, so reaching
/// this body at all means the check succeeded.
pub async fn guarded_probe(_guard: RefererGuard) -> Json<bool> {
    Json(true)
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_passes() {
        assert!(is_all_digits("0123456789"));
    }

    #[test]
    fn empty_string_is_not_digits() {
        assert!(!is_all_digits(""));
    }

    #[test]
    fn mixed_content_fails() {
        assert!(!is_all_digits("123a"));
        assert!(!is_all_digits(" 123"));
        assert!(!is_all_digits("12.3"));
    }
}

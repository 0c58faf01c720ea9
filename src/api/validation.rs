// Request validation layer
// Declared shapes are serde structs; these wrappers convert extractor
// rejections into 422 responses that name the offending field.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::errors::ApiError;

/// Query string binding with per-field validation diagnostics
///
/// A missing required field or a type mismatch rejects the request with
/// 422 and a message naming the field; the handler never runs. Optional
/// fields bind to their serde defaults (`Option<T>` absent values stay
/// `None` and serialize as `null`).
///
/// Usage:
/// ```rust
/// use routebook_api::api::validation::ValidatedQuery;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Params {
///     name: String,
/// }
///
/// async fn handler(ValidatedQuery(params): ValidatedQuery<Params>) -> String {
///     params.name
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::unprocessable_entity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Form-encoded body binding, same failure contract as [`ValidatedQuery`]
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::unprocessable_entity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body binding, same failure contract as [`ValidatedQuery`]
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::unprocessable_entity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameter binding, same failure contract as [`ValidatedQuery`]
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::unprocessable_entity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Extracts a required header, rejecting with 422 when absent
pub fn require_header(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ApiError::unprocessable_entity(format!("missing required header `{name}`")))
}

/// Extracts an optional header; absent or undecodable values become `None`
pub fn optional_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Validates every element of a list-typed JSON field
///
/// Element `i` failing fails the whole field; the diagnostic names both
/// the field and the index, e.g. `applications[2]: missing field client_id`.
pub fn parse_elements<T>(field: &str, values: Vec<Value>) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
{
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|err| {
                ApiError::unprocessable_entity(format!("{field}[{index}]: {err}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        left: i64,
        right: i64,
    }

    #[test]
    fn parse_elements_accepts_valid_lists() {
        let values = vec![
            json!({"left": 1, "right": 2}),
            json!({"left": 3, "right": 4}),
        ];
        let pairs: Vec<Pair> = parse_elements("pairs", values).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], Pair { left: 3, right: 4 });
    }

    #[test]
    fn parse_elements_reports_index_and_field() {
        let values = vec![
            json!({"left": 1, "right": 2}),
            json!({"left": 1}),
        ];
        let err = parse_elements::<Pair>("pairs", values).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.starts_with("pairs[1]:"));
        assert!(err.message.contains("right"));
    }

    #[test]
    fn require_header_names_the_missing_header() {
        let headers = HeaderMap::new();
        let err = require_header(&headers, "x-api-key").unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("x-api-key"));
    }

    #[test]
    fn optional_header_is_none_when_absent() {
        let headers = HeaderMap::new();
        assert_eq!(optional_header(&headers, "referer"), None);
    }

    #[test]
    fn header_values_round_trip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "12345".parse().unwrap());
        assert_eq!(require_header(&headers, "x-api-key").unwrap(), "12345");
        assert_eq!(
            optional_header(&headers, "x-api-key").as_deref(),
            Some("12345")
        );
    }
}

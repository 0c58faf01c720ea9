use std::collections::BTreeMap;

use axum::{
    extract::{Query, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::handlers::arguments::NameTriple;
use crate::api::validation::{parse_elements, ValidatedForm, ValidatedJson};
use crate::domain::application::ApplicationRecord;
use crate::domain::envelope::ResponseEnvelope;
use crate::domain::subscription::Subscription;

/// Combined JSON body: a list of applications, one subscription, one token
///
/// The list elements are kept raw here and validated one by one so a bad
/// element is reported with its index.
#[derive(Debug, Deserialize)]
pub struct BundlePayload {
    pub applications: Vec<Value>,
    pub subscription: Subscription,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct BundleEcho {
    pub app: Vec<ApplicationRecord>,
    pub sub: Subscription,
    pub token: String,
}

/// Echo a combined JSON body
///
/// POST /json/
pub async fn echo_json_bundle(
    ValidatedJson(payload): ValidatedJson<BundlePayload>,
) -> Result<Json<BundleEcho>, ApiError> {
    let app = parse_elements::<ApplicationRecord>("applications", payload.applications)?;

    Ok(Json(BundleEcho {
        app,
        sub: payload.subscription,
        token: payload.token,
    }))
}

/// Echo three required form fields
///
/// POST /form/
pub async fn echo_form(ValidatedForm(names): ValidatedForm<NameTriple>) -> Json<NameTriple> {
    Json(names)
}

/// Raw request echo: body, query, headers and form as received
#[derive(Debug, Serialize)]
pub struct RequestEcho {
    pub body: Value,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub form: Option<String>,
}

/// Echo the full raw request
///
/// POST /request/
///
/// A form-encoded body is echoed verbatim under `form`; any other body is
/// parsed as JSON under `body`, falling back to `null` when it is not
/// valid JSON.
pub async fn echo_request(
    Query(query): Query<BTreeMap<String, String>>,
    req: Request,
) -> Result<Json<RequestEcho>, ApiError> {
    let headers: BTreeMap<String, String> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect();

    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|err| ApiError::bad_request(format!("failed to read request body: {err}")))?;

    let (body, form) = if is_form {
        (Value::Null, Some(String::from_utf8_lossy(&bytes).into_owned()))
    } else {
        (serde_json::from_slice(&bytes).unwrap_or(Value::Null), None)
    };

    Ok(Json(RequestEcho {
        body,
        query,
        headers,
        form,
    }))
}

/// Echo a validated response envelope
///
/// POST /response/
///
/// The declared return type is the response schema: omitted fields arrive
/// as their defaults and nothing outside the envelope can be emitted.
pub async fn echo_envelope(
    ValidatedJson(envelope): ValidatedJson<ResponseEnvelope>,
) -> Json<ResponseEnvelope> {
    Json(envelope)
}

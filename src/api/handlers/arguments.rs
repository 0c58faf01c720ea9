use std::sync::OnceLock;

use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::validation::ValidatedQuery;

/// Three required query fields, echoed verbatim
#[derive(Debug, Serialize, Deserialize)]
pub struct NameTriple {
    pub first_name: String,
    pub second_name: String,
    pub third_name: String,
}

/// Three required query fields plus one optional
///
/// An omitted `nick_name` binds to `None` and serializes as `null` - the
/// key is always present in the response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct NameTripleWithNick {
    pub first_name: String,
    pub second_name: String,
    pub third_name: String,
    pub nick_name: Option<String>,
}

fn default_nick_name() -> String {
    "admin".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    pub name: String,
    #[serde(default = "default_nick_name")]
    pub nick_name: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub nick_name: String,
    pub current_time: &'static str,
}

static PROCESS_START: OnceLock<String> = OnceLock::new();

/// Timestamp frozen at process start
///
/// Primed once from `main`; every response carries the same value for the
/// lifetime of the process.
pub fn process_start_time() -> &'static str {
    PROCESS_START.get_or_init(|| Local::now().format("%a %b %e %H:%M:%S %Y").to_string())
}

/// Echo three required query fields
///
/// GET /arguments_1/
pub async fn echo_required(
    ValidatedQuery(names): ValidatedQuery<NameTriple>,
) -> Json<NameTriple> {
    Json(names)
}

/// Echo three required and one optional query field
///
/// GET /arguments_2/
pub async fn echo_optional(
    ValidatedQuery(names): ValidatedQuery<NameTripleWithNick>,
) -> Json<NameTripleWithNick> {
    Json(names)
}

/// Echo a name, a defaulted nickname and the process start timestamp
///
/// GET /arguments_3/
pub async fn echo_defaulted(
    ValidatedQuery(params): ValidatedQuery<ProfileParams>,
) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        name: params.name,
        nick_name: params.nick_name,
        current_time: process_start_time(),
    })
}

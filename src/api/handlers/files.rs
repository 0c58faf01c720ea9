use std::path::Path as FsPath;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::validation::ValidatedPath;
use crate::config::AppState;
use crate::domain::envelope::ResponseEnvelope;

const MISSING_FILE_ERROR: &str = "there are no files with that name";

#[derive(Debug, Serialize)]
pub struct FileSize {
    pub file_size: usize,
}

#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub filename: String,
}

/// Report the byte length of a raw payload
///
/// POST /files/
pub async fn byte_length(body: Bytes) -> Json<FileSize> {
    Json(FileSize {
        file_size: body.len(),
    })
}

/// Store a multipart upload and echo the client's filename
///
/// POST /upload_file/
///
/// Each request writes to its own destination under the upload directory,
/// so concurrent uploads never touch the same file.
pub async fn store_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(|err| {
        ApiError::unprocessable_entity(format!("malformed multipart body: {err}"))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let destination = state.upload_dir.join(format!("{}.upload", Uuid::new_v4()));

        let mut file = tokio::fs::File::create(&destination).await.map_err(|err| {
            ApiError::internal_server_error(format!(
                "failed to create {}: {err}",
                destination.display()
            ))
        })?;

        while let Some(chunk) = field.chunk().await.map_err(|err| {
            ApiError::unprocessable_entity(format!("failed to read upload: {err}"))
        })? {
            file.write_all(&chunk).await.map_err(|err| {
                ApiError::internal_server_error(format!(
                    "failed to write {}: {err}",
                    destination.display()
                ))
            })?;
        }

        tracing::info!(destination = %destination.display(), "stored upload");

        return Ok(Json(UploadReceipt { filename }));
    }

    Err(ApiError::unprocessable_entity(
        "missing required multipart field `file`",
    ))
}

/// Stream a stored image or report a soft failure
///
/// GET /response_file/:file_name
///
/// The name is checked against an allow-list before it goes anywhere near
/// a path, so separators and dots cannot escape the public directory. A
/// rejected name and a missing file look the same to the client: HTTP 200
/// with a failure envelope.
pub async fn fetch_file(
    State(state): State<AppState>,
    ValidatedPath(file_name): ValidatedPath<String>,
) -> Response {
    if !is_safe_file_name(&file_name) {
        return Json(ResponseEnvelope::failure(MISSING_FILE_ERROR)).into_response();
    }

    let path = state.public_dir.join(format!("{file_name}.jpg"));

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(CONTENT_TYPE, content_type_for(&path))], bytes).into_response(),
        Err(_) => Json(ResponseEnvelope::failure(MISSING_FILE_ERROR)).into_response(),
    }
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_safe() {
        assert!(is_safe_file_name("portrait"));
        assert!(is_safe_file_name("photo_2024-01"));
    }

    #[test]
    fn separators_and_dots_are_rejected() {
        assert!(!is_safe_file_name("../etc/passwd"));
        assert!(!is_safe_file_name("a/b"));
        assert!(!is_safe_file_name("a\\b"));
        assert!(!is_safe_file_name("."));
        assert!(!is_safe_file_name(""));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(FsPath::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(FsPath::new("a.png")), "image/png");
        assert_eq!(
            content_type_for(FsPath::new("a.bin")),
            "application/octet-stream"
        );
    }
}

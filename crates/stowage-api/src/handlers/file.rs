//! File upload, listing, and download handlers.

use std::io;

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use stowage_core::error::AppError;
use stowage_entity::file::FileRecord;
use stowage_service::file::{FileListing, UploadParams};

use crate::dto::request::{DownloadQuery, UploadQuery};
use crate::error::ApiError;
use crate::extractors::{AuthUser, WindowParams};
use crate::state::AppState;

/// Multipart field carrying the file contents.
const FILE_FIELD: &str = "file";

/// POST /v1/files/upload?path=<dir>
///
/// Streams the `file` part straight into storage; the body is never buffered
/// whole.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileRecord>), ApiError> {
    let Query(query) = query?;
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Upload part has no file name"))?;

        let body = StreamReader::new(field.map_err(io::Error::other));
        let file = state
            .upload_service
            .upload(
                &auth,
                UploadParams {
                    path: query.path,
                    file_name,
                },
                body,
            )
            .await?;

        return Ok((StatusCode::CREATED, Json(file)));
    }

    Err(AppError::validation(format!("Missing multipart field '{FILE_FIELD}'")).into())
}

/// GET|POST /v1/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Result<Query<WindowParams>, QueryRejection>,
) -> Result<Json<FileListing>, ApiError> {
    let Query(params) = params?;
    let listing = state.file_service.list(&auth, params.into_window()).await?;
    Ok(Json(listing))
}

/// GET /v1/files/download?id=<uuid>
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let result = state.download_service.download(&auth, query.id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.filename),
        )
        .header(header::CONTENT_LENGTH, result.size)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// `attachment` disposition carrying the original name.
///
/// Plain ASCII names go out quoted as-is. Anything else gets an ASCII
/// fallback in `filename` plus the exact name in the RFC 5987 `filename*`
/// parameter.
fn content_disposition(filename: &str) -> String {
    let plain = filename
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\');
    if plain {
        return format!("attachment; filename=\"{filename}\"");
    }

    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

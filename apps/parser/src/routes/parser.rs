use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::formats::{normalize_mime, ACCEPTED_MIME_TYPES};
use crate::parsing::{ParseError, ResumeParser, StructuredProfile};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub data: StructuredProfile,
}

impl ParseResponse {
    fn ok(data: StructuredProfile) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    #[serde(default)]
    pub text: String,
}

struct Upload {
    file_name: Option<String>,
    content_type: String,
    bytes: Bytes,
}

/// POST /api/parser/parse-resume
/// Multipart upload; the document is read from the `resume` field, or the
/// first file field when no part carries that name.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    if upload.bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    let mime_type = normalize_mime(&upload.content_type);
    if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(AppError::InvalidFileType(format!(
            "Unsupported file type '{}'. Accepted types: {}",
            upload.content_type,
            ACCEPTED_MIME_TYPES.join(", ")
        )));
    }

    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        mime_type = %mime_type,
        size = upload.bytes.len(),
        "Parsing uploaded resume"
    );

    let profile = run_parser(state.parser.clone(), move |parser| {
        parser.parse_document(&upload.bytes, &mime_type)
    })
    .await?;

    Ok(ParseResponse::ok(profile))
}

/// POST /api/parser/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("Text content is required".to_string()));
    }

    let profile = run_parser(state.parser.clone(), move |parser| {
        parser.parse_text(&req.text)
    })
    .await?;

    Ok(ParseResponse::ok(profile))
}

/// Parsing is CPU-bound; keep it off the async workers.
async fn run_parser<F>(parser: Arc<ResumeParser>, job: F) -> Result<StructuredProfile, AppError>
where
    F: FnOnce(&ResumeParser) -> Result<StructuredProfile, ParseError> + Send + 'static,
{
    let profile = tokio::task::spawn_blocking(move || job(&parser))
        .await
        .map_err(|e| anyhow::anyhow!("parser task failed: {e}"))??;
    Ok(profile)
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let mut fallback: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_named = field.name() == Some(UPLOAD_FIELD);
        let is_file = field.file_name().is_some();
        if !is_named && (!is_file || fallback.is_some()) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let upload = Upload {
            file_name,
            content_type,
            bytes,
        };

        if is_named {
            return Ok(upload);
        }
        fallback = Some(upload);
    }

    fallback.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

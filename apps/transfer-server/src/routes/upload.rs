//! Upload Routes
//!
//! HTTP endpoint for submission uploads.
//!
//! Endpoints:
//! - POST /upload - Upload a whole file, or one chunk of it when the form
//!   carries `dzchunkindex`

use axum::{
    body::Bytes,
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::upload::{
    BodySource, ChunkInfo, FilePart, SubmissionId, UploadError, UploadOutcome, UploadRequest,
    SUBMITTED,
};

// ============================================================================
// Router
// ============================================================================

/// Create the upload router
pub fn router(max_request_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(max_request_bytes))
}

// ============================================================================
// Form
// ============================================================================

/// Text fields of the multipart upload form
#[derive(Debug, Default)]
struct UploadForm {
    identifier: Option<String>,
    chunk_index: Option<String>,
    total_file_size: Option<String>,
    chunk_size: Option<String>,
    total_chunk_count: Option<String>,
}

impl UploadForm {
    /// Slot for a text field, `None` for fields the upload ignores
    fn field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "identifier" => Some(&mut self.identifier),
            "dzchunkindex" => Some(&mut self.chunk_index),
            "dztotalfilesize" => Some(&mut self.total_file_size),
            "dzchunksize" => Some(&mut self.chunk_size),
            "dztotalchunkcount" => Some(&mut self.total_chunk_count),
            _ => None,
        }
    }

    /// Build the reassembler request from the fields read so far
    fn into_request<'a>(
        self,
        file: Option<FilePart<'a>>,
    ) -> std::result::Result<UploadRequest<'a>, UploadError> {
        let submission = SubmissionId::parse(self.identifier.as_deref().unwrap_or_default())?;
        let chunk = self.chunk_info()?;

        Ok(UploadRequest {
            submission,
            file,
            chunk,
        })
    }

    /// Chunk metadata, `None` for a single-shot upload
    fn chunk_info(&self) -> std::result::Result<Option<ChunkInfo>, UploadError> {
        let Some(index) = present(&self.chunk_index) else {
            return Ok(None);
        };

        Ok(Some(ChunkInfo {
            index: parse_number("dzchunkindex", index)?,
            total_chunk_count: optional_number("dztotalchunkcount", &self.total_chunk_count)?,
            chunk_size: optional_number("dzchunksize", &self.chunk_size)?,
            total_file_size: optional_number("dztotalfilesize", &self.total_file_size)?,
        }))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, value: &str) -> std::result::Result<u64, UploadError> {
    value.parse().map_err(|_| UploadError::InvalidChunkField {
        field,
        value: value.to_string(),
    })
}

fn optional_number(
    field: &'static str,
    value: &Option<String>,
) -> std::result::Result<Option<u64>, UploadError> {
    present(value).map(|v| parse_number(field, v)).transpose()
}

/// A multipart file field read piece by piece as it arrives
#[async_trait::async_trait]
impl<'a> BodySource for Field<'a> {
    async fn next_chunk(&mut self) -> std::result::Result<Option<Bytes>, UploadError> {
        self.chunk()
            .await
            .map_err(|e| UploadError::BodyRead(e.to_string()))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload
///
/// Single-shot uploads answer `Submitted`; chunks answer with a JSON
/// acknowledgment whose `complete` flag is set on the last chunk.
///
/// When the identifier and chunk fields precede the file part, as Dropzone
/// sends them, the file is streamed to disk and later fields are not read.
/// A file part sent before the identifier is buffered until the form ends.
async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> Result<Response> {
    let mut form = UploadForm::default();
    let mut buffered: Option<FilePart<'static>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();

            if form.identifier.is_some() {
                let request = form.into_request(Some(FilePart::new(file_name, field)))?;
                let outcome = state.reassembler().accept(request).await?;
                return Ok(respond(outcome));
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unable to get form file: {}", e)))?;
            buffered = Some(FilePart::buffered(file_name, data));
            continue;
        }

        let Some(target) = form.field_mut(&name) else {
            tracing::trace!(field = %name, "Ignoring form field");
            continue;
        };

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Unable to read {}: {}", name, e)))?;
        *target = Some(value);
    }

    let request = form.into_request(buffered)?;
    let outcome = state.reassembler().accept(request).await?;
    Ok(respond(outcome))
}

fn respond(outcome: UploadOutcome) -> Response {
    match outcome {
        UploadOutcome::Stored { .. } => (StatusCode::OK, SUBMITTED).into_response(),
        UploadOutcome::Chunk(ack) => (StatusCode::OK, Json(ack)).into_response(),
    }
}

// ============================================================================
// Tests
// ============================================================================

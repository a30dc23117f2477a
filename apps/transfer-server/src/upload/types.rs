//! Upload types for submission file transfers

use std::fmt;

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default request body limit for `/upload`: 1GB
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024 * 1024;

/// Chunk progress entries untouched for this long are dropped
pub const DEFAULT_STALE_HOURS: i64 = 24;

/// Body returned for a successful single-shot upload
pub const SUBMITTED: &str = "Submitted";

/// Directory inside a submission area holding progress records of unfinished
/// chunked uploads. Reserved, so never accepted as a file name.
pub const PROGRESS_DIR: &str = ".partial";

// ============================================================================
// Identity
// ============================================================================

/// Validated submission identifier
///
/// The identifier names a directory under the upload root, so it must be a
/// single, non-empty path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Validate a raw identifier taken from the upload form
    pub fn parse(raw: &str) -> Result<Self, UploadError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(UploadError::MissingIdentifier);
        }

        if raw == "." || raw == ".." || raw.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
            return Err(UploadError::InvalidIdentifier(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce a client supplied file name to its final path segment.
///
/// Both `/` and `\` count as separators so `..\..\x` and `../../x` confine
/// the same way regardless of the host platform.
pub fn confine_file_name(raw: &str) -> Result<String, UploadError> {
    let base = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    if base.is_empty()
        || base == "."
        || base == ".."
        || base == PROGRESS_DIR
        || base.contains('\0')
    {
        return Err(UploadError::InvalidFileName(raw.to_string()));
    }

    Ok(base.to_string())
}

// ============================================================================
// Request Types
// ============================================================================

/// Chunk metadata sent alongside a chunked upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkInfo {
    /// Zero based position of this chunk
    pub index: u64,

    /// Number of chunks the client split the file into
    pub total_chunk_count: Option<u64>,

    /// Nominal chunk size in bytes
    pub chunk_size: Option<u64>,

    /// Size of the complete file in bytes
    pub total_file_size: Option<u64>,
}

impl ChunkInfo {
    /// Index expected after this chunk
    pub fn next_index(&self) -> Result<u64, UploadError> {
        self.index
            .checked_add(1)
            .ok_or_else(|| UploadError::InvalidChunkField {
                field: "dzchunkindex",
                value: self.index.to_string(),
            })
    }

    /// Whether this chunk is the last one the client announced
    pub fn is_last(&self) -> bool {
        self.total_chunk_count
            .map(|total| self.index.saturating_add(1) == total)
            .unwrap_or(false)
    }
}

/// Source of file bytes, read piece by piece while they are written out
#[async_trait::async_trait]
pub trait BodySource: Send {
    /// Next piece of the body, `None` once it is exhausted
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, UploadError>;
}

/// Body already held in memory
pub struct BufferedBody(Option<Bytes>);

impl BufferedBody {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(Some(data.into()))
    }
}

#[async_trait::async_trait]
impl BodySource for BufferedBody {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, UploadError> {
        Ok(self.0.take())
    }
}

/// File part received in the upload form
pub struct FilePart<'a> {
    /// Name as declared by the client, not yet confined
    pub file_name: String,

    pub body: Box<dyn BodySource + 'a>,
}

impl<'a> FilePart<'a> {
    pub fn new(file_name: impl Into<String>, body: impl BodySource + 'a) -> Self {
        Self {
            file_name: file_name.into(),
            body: Box::new(body),
        }
    }

    pub fn buffered(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(file_name, BufferedBody::new(data))
    }
}

/// One call to the reassembler
pub struct UploadRequest<'a> {
    pub submission: SubmissionId,

    /// `None` when the form carried no file part
    pub file: Option<FilePart<'a>>,

    /// `Some` selects chunked mode
    pub chunk: Option<ChunkInfo>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Acknowledgment sent for every accepted chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkAck {
    /// Chunk index that was appended
    pub chunk_index: u64,

    /// Total chunks announced by the client, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_chunks: Option<u64>,

    /// Size of the destination file after this chunk
    pub bytes_received: u64,

    /// Whether the last announced chunk has been appended
    pub complete: bool,
}

/// Result of a successful upload call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// A single-shot file was written in full
    Stored { file_name: String, size: u64 },

    /// A chunk was appended
    Chunk(ChunkAck),
}

// ============================================================================
// Progress Types
// ============================================================================

/// Sequence state for one chunked destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkProgress {
    /// Index the next chunk must carry
    pub next_index: u64,

    /// Bytes on disk after the last appended chunk
    pub bytes_received: u64,

    pub total_chunks: Option<u64>,

    pub total_file_size: Option<u64>,

    pub status: ProgressStatus,

    pub started_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ChunkProgress {
    /// Progress starting at `index` with `bytes` already on disk
    pub fn starting_at(index: u64, bytes: u64, chunk: &ChunkInfo) -> Self {
        let now = Utc::now();
        Self {
            next_index: index,
            bytes_received: bytes,
            total_chunks: chunk.total_chunk_count,
            total_file_size: chunk.total_file_size,
            status: ProgressStatus::Uploading,
            started_at: now,
            updated_at: now,
        }
    }

    /// Record an appended chunk
    pub fn advance(&mut self, chunk: &ChunkInfo, bytes_on_disk: u64) -> Result<(), UploadError> {
        self.next_index = chunk.next_index()?;
        self.bytes_received = bytes_on_disk;
        if chunk.total_chunk_count.is_some() {
            self.total_chunks = chunk.total_chunk_count;
        }
        if chunk.total_file_size.is_some() {
            self.total_file_size = chunk.total_file_size;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.status == ProgressStatus::Complete
    }
}

/// Chunked destination status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    /// Receiving chunks
    Uploading,
    /// Last announced chunk appended
    Complete,
}

// ============================================================================
// Error Types
// ============================================================================

/// Upload error types
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload identifier missing")]
    MissingIdentifier,

    #[error("Invalid upload identifier: {0}")]
    InvalidIdentifier(String),

    #[error("file part missing")]
    MissingFile,

    #[error("Unable to read file part: {0}")]
    BodyRead(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidChunkField { field: &'static str, value: String },

    #[error("Chunk index out of bounds: {index} (total: {total})")]
    ChunkIndexOutOfBounds { index: u64, total: u64 },

    #[error("File {0} already exists")]
    AlreadyExists(String),

    #[error("Chunk out of order for {file_name}: expected {expected}, got {received}")]
    ChunkOutOfOrder {
        file_name: String,
        expected: u64,
        received: u64,
    },

    #[error("Upload of {0} is already complete")]
    UploadComplete(String),

    #[error("Cannot resume {file_name}: {recorded} bytes recorded, {on_disk} on disk")]
    ResumeConflict {
        file_name: String,
        recorded: u64,
        on_disk: u64,
    },

    #[error("Size mismatch for {file_name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        file_name: String,
        expected: u64,
        actual: u64,
    },

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl UploadError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::MissingIdentifier => StatusCode::BAD_REQUEST,
            Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            Self::InvalidChunkField { .. } => StatusCode::BAD_REQUEST,
            Self::ChunkIndexOutOfBounds { .. } => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::ChunkOutOfOrder { .. } => StatusCode::CONFLICT,
            Self::UploadComplete(_) => StatusCode::CONFLICT,
            Self::ResumeConflict { .. } => StatusCode::CONFLICT,
            Self::SizeMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingIdentifier => "MISSING_IDENTIFIER",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::MissingFile => "MISSING_FILE",
            Self::BodyRead(_) => "BODY_READ_ERROR",
            Self::InvalidFileName(_) => "INVALID_FILE_NAME",
            Self::InvalidChunkField { .. } => "INVALID_CHUNK_FIELD",
            Self::ChunkIndexOutOfBounds { .. } => "CHUNK_INDEX_OUT_OF_BOUNDS",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::ChunkOutOfOrder { .. } => "CHUNK_OUT_OF_ORDER",
            Self::UploadComplete(_) => "UPLOAD_COMPLETE",
            Self::ResumeConflict { .. } => "RESUME_CONFLICT",
            Self::SizeMismatch { .. } => "SIZE_MISMATCH",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

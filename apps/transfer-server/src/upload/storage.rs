//! Upload Storage
//!
//! Durable storage for submission files. Each submission owns one directory
//! under the upload root; files inside it are only ever created exclusively
//! or grown by append.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::types::{BodySource, ChunkProgress, SubmissionId, UploadError, PROGRESS_DIR};

// ============================================================================
// Storage Trait
// ============================================================================

/// Trait for upload storage backends
///
/// `file_name` arguments are already confined to a single path segment.
#[async_trait::async_trait]
pub trait UploadStorage: Send + Sync {
    /// Make sure the submission area exists. Idempotent.
    async fn prepare_area(&self, submission: &SubmissionId) -> Result<(), UploadError>;

    /// Atomically create a new file and stream `body` into it.
    ///
    /// Fails with `AlreadyExists` if the destination is present; nothing is
    /// written in that case. A body that fails midway leaves no file behind.
    async fn create_new(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        body: &mut dyn BodySource,
    ) -> Result<u64, UploadError>;

    /// Stream `body` onto the end of an existing file, returning the new size.
    ///
    /// A body that fails midway leaves the file at its previous size.
    async fn append(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        body: &mut dyn BodySource,
    ) -> Result<u64, UploadError>;

    /// Current size of a file, `None` if it does not exist
    async fn size(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<Option<u64>, UploadError>;

    /// Persist the progress of an unfinished chunked upload
    async fn save_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        progress: &ChunkProgress,
    ) -> Result<(), UploadError>;

    /// Progress recorded for an unfinished chunked upload, if any
    async fn load_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<Option<ChunkProgress>, UploadError>;

    /// Forget the progress record once an upload is finished
    async fn clear_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<(), UploadError>;
}

// ============================================================================
// Local Filesystem Storage
// ============================================================================

/// Local filesystem upload storage
///
/// Layout:
/// - `<base>/<submission>/<file name>`: the file itself
/// - `<base>/<submission>/.partial/<file name>`: JSON progress record while a
///   chunked upload is unfinished
#[derive(Debug, Clone)]
pub struct LocalUploadStorage {
    base_path: PathBuf,
}

impl LocalUploadStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn area_path(&self, submission: &SubmissionId) -> PathBuf {
        self.base_path.join(submission.as_str())
    }

    fn file_path(&self, submission: &SubmissionId, file_name: &str) -> PathBuf {
        self.area_path(submission).join(file_name)
    }

    fn progress_path(&self, submission: &SubmissionId, file_name: &str) -> PathBuf {
        self.area_path(submission).join(PROGRESS_DIR).join(file_name)
    }
}

fn storage_error(action: &str, path: &Path, e: std::io::Error) -> UploadError {
    UploadError::StorageError(format!("{} {}: {}", action, path.display(), e))
}

/// Write every piece of `body` to `file`, returning the number of bytes written
async fn copy_body(
    file: &mut File,
    body: &mut dyn BodySource,
    path: &Path,
) -> Result<u64, UploadError> {
    let mut written = 0u64;

    while let Some(chunk) = body.next_chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| storage_error("unable to write", path, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| storage_error("unable to flush", path, e))?;

    Ok(written)
}

#[async_trait::async_trait]
impl UploadStorage for LocalUploadStorage {
    async fn prepare_area(&self, submission: &SubmissionId) -> Result<(), UploadError> {
        let area = self.area_path(submission);
        fs::create_dir_all(&area)
            .await
            .map_err(|e| storage_error("unable to create upload directory", &area, e))
    }

    async fn create_new(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        body: &mut dyn BodySource,
    ) -> Result<u64, UploadError> {
        let path = self.file_path(submission, file_name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    UploadError::AlreadyExists(format!("{}/{}", submission, file_name))
                }
                _ => storage_error("unable to create", &path, e),
            })?;

        match copy_body(&mut file, body, &path).await {
            Ok(written) => Ok(written),
            Err(e) => {
                drop(file);
                if let Err(remove_err) = fs::remove_file(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %remove_err,
                        "Unable to remove partial file"
                    );
                }
                Err(e)
            }
        }
    }

    async fn append(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        body: &mut dyn BodySource,
    ) -> Result<u64, UploadError> {
        let path = self.file_path(submission, file_name);

        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(|e| storage_error("unable to open", &path, e))?;

        let before = file
            .metadata()
            .await
            .map_err(|e| storage_error("unable to stat", &path, e))?
            .len();

        match copy_body(&mut file, body, &path).await {
            Ok(written) => Ok(before + written),
            Err(e) => {
                if let Err(truncate_err) = file.set_len(before).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %truncate_err,
                        "Unable to roll back partial chunk"
                    );
                }
                Err(e)
            }
        }
    }

    async fn size(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<Option<u64>, UploadError> {
        let path = self.file_path(submission, file_name);
        match fs::metadata(&path).await {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("unable to stat", &path, e)),
        }
    }

    async fn save_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        progress: &ChunkProgress,
    ) -> Result<(), UploadError> {
        let dir = self.area_path(submission).join(PROGRESS_DIR);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("unable to create progress directory", &dir, e))?;

        let path = self.progress_path(submission, file_name);
        let record = serde_json::to_vec(progress)
            .map_err(|e| UploadError::StorageError(format!("unable to encode progress: {}", e)))?;

        fs::write(&path, record)
            .await
            .map_err(|e| storage_error("unable to write", &path, e))
    }

    async fn load_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<Option<ChunkProgress>, UploadError> {
        let path = self.progress_path(submission, file_name);
        let record = match fs::read(&path).await {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("unable to read", &path, e)),
        };

        serde_json::from_slice(&record).map(Some).map_err(|e| {
            UploadError::StorageError(format!("corrupt progress record {}: {}", path.display(), e))
        })
    }

    async fn clear_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
    ) -> Result<(), UploadError> {
        let path = self.progress_path(submission, file_name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("unable to remove", &path, e)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

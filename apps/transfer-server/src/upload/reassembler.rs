//! Upload Reassembler
//!
//! Turns single-shot uploads and ordered chunk sequences into complete files
//! under `<upload root>/<submission>/<file name>`.

use std::sync::Arc;

use super::session::{SessionManager, UploadKey};
use super::storage::UploadStorage;
use super::types::{
    confine_file_name, ChunkAck, ChunkInfo, ChunkProgress, FilePart, ProgressStatus,
    SubmissionId, UploadError, UploadOutcome, UploadRequest,
};

/// Accepts uploads for submissions
#[derive(Clone)]
pub struct Reassembler {
    storage: Arc<dyn UploadStorage>,
    sessions: SessionManager,
}

impl Reassembler {
    pub fn new(storage: Arc<dyn UploadStorage>, sessions: SessionManager) -> Self {
        Self { storage, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Accept one upload request.
    ///
    /// The submission area is created before the file part is inspected, so
    /// a request without a file still leaves the (empty) area behind.
    pub async fn accept(&self, request: UploadRequest<'_>) -> Result<UploadOutcome, UploadError> {
        let UploadRequest {
            submission,
            file,
            chunk,
        } = request;

        self.storage.prepare_area(&submission).await?;

        let mut file = file.ok_or(UploadError::MissingFile)?;
        let file_name = confine_file_name(&file.file_name)?;

        match chunk {
            None => self.accept_single(&submission, &file_name, &mut file).await,
            Some(chunk) => self
                .accept_chunk(&submission, &file_name, &mut file, chunk)
                .await
                .map(UploadOutcome::Chunk),
        }
    }

    async fn accept_single(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        file: &mut FilePart<'_>,
    ) -> Result<UploadOutcome, UploadError> {
        tracing::info!(
            submission = %submission,
            file_name = %file_name,
            "Receiving non-chunked file"
        );

        let size = self
            .storage
            .create_new(submission, file_name, &mut *file.body)
            .await?;

        tracing::info!(
            submission = %submission,
            file_name = %file_name,
            size = size,
            "Done receiving file"
        );

        Ok(UploadOutcome::Stored {
            file_name: file_name.to_string(),
            size,
        })
    }

    async fn accept_chunk(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        file: &mut FilePart<'_>,
        chunk: ChunkInfo,
    ) -> Result<ChunkAck, UploadError> {
        if let Some(total) = chunk.total_chunk_count {
            if chunk.index >= total {
                return Err(UploadError::ChunkIndexOutOfBounds {
                    index: chunk.index,
                    total,
                });
            }
        }
        chunk.next_index()?;

        tracing::debug!(
            submission = %submission,
            file_name = %file_name,
            chunk_index = chunk.index,
            chunk_size = ?chunk.chunk_size,
            "Received chunk"
        );

        let key = UploadKey::new(submission, file_name);
        let slot = self.sessions.slot(&key).await;
        let result = {
            let mut progress = slot.lock().await;
            self.append_chunk(&mut progress, submission, file_name, file, &chunk)
                .await
        };

        if result.is_err() {
            drop(slot);
            self.sessions.release_if_idle(&key).await;
        }

        result
    }

    /// Apply one chunk while holding the destination's session lock
    async fn append_chunk(
        &self,
        progress: &mut Option<ChunkProgress>,
        submission: &SubmissionId,
        file_name: &str,
        file: &mut FilePart<'_>,
        chunk: &ChunkInfo,
    ) -> Result<ChunkAck, UploadError> {
        let mut current = if chunk.index == 0 {
            // A completed or in-flight upload keeps its file, so create-exclusive
            // rejects the restart before anything is appended.
            let size = self
                .storage
                .create_new(submission, file_name, &mut *file.body)
                .await?;
            let mut fresh = ChunkProgress::starting_at(0, 0, chunk);
            fresh.advance(chunk, size)?;
            fresh
        } else {
            let mut current = match progress.clone() {
                Some(current) => current,
                None => self.resume(submission, file_name, chunk).await?,
            };

            if current.is_complete() {
                return Err(UploadError::UploadComplete(format!(
                    "{}/{}",
                    submission, file_name
                )));
            }

            if chunk.index != current.next_index {
                return Err(UploadError::ChunkOutOfOrder {
                    file_name: file_name.to_string(),
                    expected: current.next_index,
                    received: chunk.index,
                });
            }

            let size = self
                .storage
                .append(submission, file_name, &mut *file.body)
                .await?;
            current.advance(chunk, size)?;
            current
        };

        let complete = chunk.is_last();
        if complete {
            current.status = ProgressStatus::Complete;
        }
        *progress = Some(current.clone());
        self.record_progress(submission, file_name, &current).await;

        if complete {
            if let Some(expected) = current.total_file_size {
                if expected != current.bytes_received {
                    tracing::warn!(
                        submission = %submission,
                        file_name = %file_name,
                        expected = expected,
                        actual = current.bytes_received,
                        "Completed upload size mismatch"
                    );
                    return Err(UploadError::SizeMismatch {
                        file_name: file_name.to_string(),
                        expected,
                        actual: current.bytes_received,
                    });
                }
            }

            tracing::info!(
                submission = %submission,
                file_name = %file_name,
                chunks = chunk.index + 1,
                bytes = current.bytes_received,
                "Chunked upload complete"
            );
        }

        Ok(ChunkAck {
            chunk_index: chunk.index,
            total_chunks: current.total_chunks,
            bytes_received: current.bytes_received,
            complete,
        })
    }

    /// Keep the durable progress record in step with the session.
    ///
    /// A stale record never matches the file size, so a failed write only
    /// costs the ability to resume after a restart.
    async fn record_progress(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        progress: &ChunkProgress,
    ) {
        let result = if progress.is_complete() {
            self.storage.clear_progress(submission, file_name).await
        } else {
            self.storage
                .save_progress(submission, file_name, progress)
                .await
        };

        if let Err(e) = result {
            tracing::warn!(
                submission = %submission,
                file_name = %file_name,
                error = %e,
                "Unable to record upload progress"
            );
        }
    }

    /// Rebuild a session for a destination with no progress in memory, e.g.
    /// after a restart or once the session expired.
    ///
    /// Only an upload with a progress record matching the file on disk can be
    /// resumed. Single-shot files and finished uploads have no record.
    async fn resume(
        &self,
        submission: &SubmissionId,
        file_name: &str,
        chunk: &ChunkInfo,
    ) -> Result<ChunkProgress, UploadError> {
        let Some(on_disk) = self.storage.size(submission, file_name).await? else {
            return Err(UploadError::ChunkOutOfOrder {
                file_name: file_name.to_string(),
                expected: 0,
                received: chunk.index,
            });
        };

        let Some(saved) = self.storage.load_progress(submission, file_name).await? else {
            return Err(UploadError::UploadComplete(format!(
                "{}/{}",
                submission, file_name
            )));
        };

        if saved.bytes_received != on_disk {
            return Err(UploadError::ResumeConflict {
                file_name: file_name.to_string(),
                recorded: saved.bytes_received,
                on_disk,
            });
        }

        tracing::info!(
            submission = %submission,
            file_name = %file_name,
            next_index = saved.next_index,
            bytes = on_disk,
            "Resuming chunked upload from progress record"
        );

        Ok(saved)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::storage::LocalUploadStorage;
    use crate::upload::types::BodySource;
    use std::path::Path;
    use tempfile::TempDir;

    fn reassembler(root: &Path) -> Reassembler {
        Reassembler::new(
            Arc::new(LocalUploadStorage::new(root)),
            SessionManager::new(),
        )
    }

    fn submission(id: &str) -> SubmissionId {
        SubmissionId::parse(id).unwrap()
    }

    fn single(id: &str, file_name: &str, data: &'static [u8]) -> UploadRequest<'static> {
        UploadRequest {
            submission: submission(id),
            file: Some(FilePart::buffered(file_name, data)),
            chunk: None,
        }
    }

    fn chunk(
        id: &str,
        file_name: &str,
        index: u64,
        total: u64,
        data: &'static [u8],
    ) -> UploadRequest<'static> {
        UploadRequest {
            chunk: Some(ChunkInfo {
                index,
                total_chunk_count: Some(total),
                chunk_size: Some(2),
                total_file_size: None,
            }),
            ..single(id, file_name, data)
        }
    }

    #[tokio::test]
    async fn test_single_shot_writes_exact_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let outcome = reassembler
            .accept(single("sub-1", "letter.txt", b"dear archivist"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            UploadOutcome::Stored {
                file_name: "letter.txt".to_string(),
                size: 14
            }
        );
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/letter.txt")).unwrap();
        assert_eq!(on_disk, b"dear archivist");
    }

    #[tokio::test]
    async fn test_single_shot_second_upload_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(single("sub-1", "scan.tif", b"original"))
            .await
            .unwrap();
        let result = reassembler
            .accept(single("sub-1", "scan.tif", b"replacement"))
            .await;

        assert!(matches!(result, Err(UploadError::AlreadyExists(_))));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/scan.tif")).unwrap();
        assert_eq!(on_disk, b"original");
    }

    #[tokio::test]
    async fn test_single_shot_is_confined_to_area() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("uploads");
        let reassembler = reassembler(&root);

        reassembler
            .accept(single("sub-1", "../../escape.txt", b"nope"))
            .await
            .unwrap();

        assert!(root.join("sub-1/escape.txt").exists());
        assert!(!temp_dir.path().join("escape.txt").exists());
        assert!(!root.join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let result = reassembler
            .accept(UploadRequest {
                submission: submission("sub-1"),
                file: None,
                chunk: None,
            })
            .await;

        assert!(matches!(result, Err(UploadError::MissingFile)));
        assert!(temp_dir.path().join("sub-1").is_dir());
    }

    #[tokio::test]
    async fn test_chunks_in_order_reassemble() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let mut acks = Vec::new();
        let chunks: [&'static [u8]; 3] = [b"AB", b"CD", b"EF"];
        for (index, data) in chunks.into_iter().enumerate() {
            let outcome = reassembler
                .accept(chunk("sub-1", "tape.wav", index as u64, 3, data))
                .await
                .unwrap();
            acks.push(outcome);
        }

        let on_disk = std::fs::read(temp_dir.path().join("sub-1/tape.wav")).unwrap();
        assert_eq!(on_disk, b"ABCDEF");

        let complete: Vec<bool> = acks
            .iter()
            .map(|outcome| match outcome {
                UploadOutcome::Chunk(ack) => ack.complete,
                _ => panic!("expected chunk ack"),
            })
            .collect();
        assert_eq!(complete, vec![false, false, true]);

        match &acks[2] {
            UploadOutcome::Chunk(ack) => assert_eq!(ack.bytes_received, 6),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_first_chunk_conflicts_with_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(single("sub-1", "done.pdf", b"complete"))
            .await
            .unwrap();

        let result = reassembler
            .accept(chunk("sub-1", "done.pdf", 0, 2, b"XX"))
            .await;

        assert!(matches!(result, Err(UploadError::AlreadyExists(_))));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/done.pdf")).unwrap();
        assert_eq!(on_disk, b"complete");
        assert_eq!(reassembler.sessions().session_count().await, 0);
    }

    #[tokio::test]
    async fn test_out_of_order_chunk_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(chunk("sub-1", "film.mov", 0, 3, b"AB"))
            .await
            .unwrap();
        let result = reassembler
            .accept(chunk("sub-1", "film.mov", 2, 3, b"EF"))
            .await;

        assert!(matches!(
            result,
            Err(UploadError::ChunkOutOfOrder {
                expected: 1,
                received: 2,
                ..
            })
        ));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/film.mov")).unwrap();
        assert_eq!(on_disk, b"AB");
    }

    #[tokio::test]
    async fn test_chunk_without_first_chunk_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let result = reassembler
            .accept(chunk("sub-1", "orphan.bin", 1, 3, b"CD"))
            .await;

        assert!(matches!(
            result,
            Err(UploadError::ChunkOutOfOrder { expected: 0, .. })
        ));
        assert!(!temp_dir.path().join("sub-1/orphan.bin").exists());
        assert_eq!(reassembler.sessions().session_count().await, 0);
    }

    #[tokio::test]
    async fn test_resume_after_restart() {
        let temp_dir = TempDir::new().unwrap();

        reassembler(temp_dir.path())
            .accept(chunk("sub-1", "long.iso", 0, 2, b"AB"))
            .await
            .unwrap();

        // Fresh session manager, as after a process restart
        let outcome = reassembler(temp_dir.path())
            .accept(chunk("sub-1", "long.iso", 1, 2, b"CD"))
            .await
            .unwrap();

        assert!(matches!(outcome, UploadOutcome::Chunk(ChunkAck { complete: true, .. })));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/long.iso")).unwrap();
        assert_eq!(on_disk, b"ABCD");
    }

    #[tokio::test]
    async fn test_chunk_after_completion_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(chunk("sub-1", "a.bin", 0, 2, b"AB"))
            .await
            .unwrap();
        reassembler
            .accept(chunk("sub-1", "a.bin", 1, 2, b"CD"))
            .await
            .unwrap();

        let result = reassembler
            .accept(chunk("sub-1", "a.bin", 1, 2, b"CD"))
            .await;
        assert!(matches!(result, Err(UploadError::UploadComplete(_))));

        let on_disk = std::fs::read(temp_dir.path().join("sub-1/a.bin")).unwrap();
        assert_eq!(on_disk, b"ABCD");
    }

    #[tokio::test]
    async fn test_index_beyond_total_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let result = reassembler
            .accept(chunk("sub-1", "a.bin", 3, 3, b"GH"))
            .await;
        assert!(matches!(
            result,
            Err(UploadError::ChunkIndexOutOfBounds { index: 3, total: 3 })
        ));
    }

    #[tokio::test]
    async fn test_total_file_size_verified_on_last_chunk() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let with_size = |index: u64, data: &'static [u8]| UploadRequest {
            chunk: Some(ChunkInfo {
                index,
                total_chunk_count: Some(2),
                chunk_size: Some(2),
                total_file_size: Some(5),
            }),
            ..single("sub-1", "short.bin", data)
        };

        reassembler.accept(with_size(0, b"AB")).await.unwrap();
        let result = reassembler.accept(with_size(1, b"CD")).await;

        assert!(matches!(
            result,
            Err(UploadError::SizeMismatch {
                expected: 5,
                actual: 4,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_chunked_file_name_is_confined() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(chunk("sub-1", "../x/part.bin", 0, 1, b"AB"))
            .await
            .unwrap();

        assert!(temp_dir.path().join("sub-1/part.bin").exists());
        assert!(!temp_dir.path().join("x").exists());
    }

    #[tokio::test]
    async fn test_concurrent_first_chunks_single_winner() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let (a, b) = tokio::join!(
            reassembler.accept(chunk("sub-1", "race.bin", 0, 2, b"AA")),
            reassembler.accept(chunk("sub-1", "race.bin", 0, 2, b"BB")),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);

        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(loser, Err(UploadError::AlreadyExists(_))));

        let on_disk = std::fs::read(temp_dir.path().join("sub-1/race.bin")).unwrap();
        assert!(on_disk == b"AA" || on_disk == b"BB");
    }

    #[tokio::test]
    async fn test_submissions_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        let (a, b) = tokio::join!(
            reassembler.accept(chunk("sub-a", "same.bin", 0, 1, b"AA")),
            reassembler.accept(chunk("sub-b", "same.bin", 0, 1, b"BB")),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(std::fs::read(temp_dir.path().join("sub-a/same.bin")).unwrap(), b"AA");
        assert_eq!(std::fs::read(temp_dir.path().join("sub-b/same.bin")).unwrap(), b"BB");
    }

    #[tokio::test]
    async fn test_chunk_onto_single_shot_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(single("sub-1", "a.txt", b"original"))
            .await
            .unwrap();
        let result = reassembler
            .accept(chunk("sub-1", "a.txt", 1, 2, b"JUNK"))
            .await;

        assert!(matches!(result, Err(UploadError::UploadComplete(_))));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/a.txt")).unwrap();
        assert_eq!(on_disk, b"original");
        assert_eq!(reassembler.sessions().session_count().await, 0);
    }

    #[tokio::test]
    async fn test_chunk_after_session_expiry_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(chunk("sub-1", "a.bin", 0, 2, b"AB"))
            .await
            .unwrap();
        reassembler
            .accept(chunk("sub-1", "a.bin", 1, 2, b"CD"))
            .await
            .unwrap();

        // Expire every session, completed ones included
        assert_eq!(reassembler.sessions().cleanup_older_than(-1).await, 1);

        let result = reassembler
            .accept(chunk("sub-1", "a.bin", 1, 2, b"CD"))
            .await;
        assert!(matches!(result, Err(UploadError::UploadComplete(_))));

        let on_disk = std::fs::read(temp_dir.path().join("sub-1/a.bin")).unwrap();
        assert_eq!(on_disk, b"ABCD");
    }

    #[tokio::test]
    async fn test_resume_uses_recorded_index() {
        let temp_dir = TempDir::new().unwrap();

        reassembler(temp_dir.path())
            .accept(chunk("sub-1", "long.iso", 0, 3, b"AB"))
            .await
            .unwrap();

        let restarted = reassembler(temp_dir.path());
        let result = restarted
            .accept(chunk("sub-1", "long.iso", 2, 3, b"EF"))
            .await;
        assert!(matches!(
            result,
            Err(UploadError::ChunkOutOfOrder {
                expected: 1,
                received: 2,
                ..
            })
        ));

        restarted
            .accept(chunk("sub-1", "long.iso", 1, 3, b"CD"))
            .await
            .unwrap();
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/long.iso")).unwrap();
        assert_eq!(on_disk, b"ABCD");
    }

    #[tokio::test]
    async fn test_resume_refuses_file_changed_on_disk() {
        let temp_dir = TempDir::new().unwrap();

        reassembler(temp_dir.path())
            .accept(chunk("sub-1", "long.iso", 0, 3, b"AB"))
            .await
            .unwrap();

        let path = temp_dir.path().join("sub-1/long.iso");
        std::fs::write(&path, b"ABXX").unwrap();

        let result = reassembler(temp_dir.path())
            .accept(chunk("sub-1", "long.iso", 1, 3, b"CD"))
            .await;
        assert!(matches!(
            result,
            Err(UploadError::ResumeConflict {
                recorded: 2,
                on_disk: 4,
                ..
            })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), b"ABXX");
    }

    #[tokio::test]
    async fn test_progress_record_removed_on_completion() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());
        let record = temp_dir.path().join("sub-1/.partial/tape.wav");

        reassembler
            .accept(chunk("sub-1", "tape.wav", 0, 2, b"AB"))
            .await
            .unwrap();
        assert!(record.exists());

        reassembler
            .accept(chunk("sub-1", "tape.wav", 1, 2, b"CD"))
            .await
            .unwrap();
        assert!(!record.exists());
    }

    #[tokio::test]
    async fn test_unbounded_index_rejected_before_io() {
        let temp_dir = TempDir::new().unwrap();
        let reassembler = reassembler(temp_dir.path());

        reassembler
            .accept(single("sub-1", "b.txt", b"original"))
            .await
            .unwrap();

        let result = reassembler
            .accept(UploadRequest {
                chunk: Some(ChunkInfo {
                    index: u64::MAX,
                    ..Default::default()
                }),
                ..single("sub-1", "b.txt", b"JUNK")
            })
            .await;

        assert!(matches!(
            result,
            Err(UploadError::InvalidChunkField {
                field: "dzchunkindex",
                ..
            })
        ));
        let on_disk = std::fs::read(temp_dir.path().join("sub-1/b.txt")).unwrap();
        assert_eq!(on_disk, b"original");
    }

    struct FailingStorage;

    #[async_trait::async_trait]
    impl UploadStorage for FailingStorage {
        async fn prepare_area(&self, _submission: &SubmissionId) -> Result<(), UploadError> {
            Ok(())
        }

        async fn create_new(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
            _body: &mut dyn BodySource,
        ) -> Result<u64, UploadError> {
            Err(UploadError::StorageError("No space left on device".to_string()))
        }

        async fn append(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
            _body: &mut dyn BodySource,
        ) -> Result<u64, UploadError> {
            Err(UploadError::StorageError("No space left on device".to_string()))
        }

        async fn size(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
        ) -> Result<Option<u64>, UploadError> {
            Ok(None)
        }

        async fn save_progress(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
            _progress: &ChunkProgress,
        ) -> Result<(), UploadError> {
            Ok(())
        }

        async fn load_progress(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
        ) -> Result<Option<ChunkProgress>, UploadError> {
            Ok(None)
        }

        async fn clear_progress(
            &self,
            _submission: &SubmissionId,
            _file_name: &str,
        ) -> Result<(), UploadError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let reassembler = Reassembler::new(Arc::new(FailingStorage), SessionManager::new());

        let result = reassembler.accept(single("sub-1", "a.txt", b"data")).await;
        match result {
            Err(UploadError::StorageError(msg)) => assert!(msg.contains("No space left")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}

//! Submission Upload Module
//!
//! Receives submission files either in one request or as an ordered
//! sequence of chunks (Dropzone style `dzchunkindex` form fields):
//! - Files are namespaced by submission identifier
//! - Destinations are created exclusively and never overwritten
//! - Chunks are appended strictly in index order
//! - Unfinished chunked uploads keep a progress record so they can resume
//!   after a restart, and nothing else can be appended to
//!
//! Protocol Flow:
//! 1. Client obtains a submission identifier
//! 2. Client posts each file, optionally split into chunks
//! 3. Server appends each chunk and acknowledges it
//! 4. The acknowledgment for the last chunk reports the upload complete

pub mod reassembler;
pub mod session;
pub mod storage;
pub mod types;

pub use reassembler::Reassembler;
pub use session::{SessionManager, UploadKey};
pub use storage::{LocalUploadStorage, UploadStorage};
pub use types::*;

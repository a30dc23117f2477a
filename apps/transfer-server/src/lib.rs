//! Archives Transfer Server Library
//!
//! Exposes the service pieces so the binary and tests share one router.
//!
//! # Modules
//!
//! - `upload`: Submission upload reassembly (single-shot and chunked)
//! - `routes`: HTTP surface
//! - `db`: Read-only MySQL reference store

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod upload;

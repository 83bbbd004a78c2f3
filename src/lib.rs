//! Backup Uploader Library
//!
//! Finds backup archives in a local directory and hands each one to AWS
//! Glacier or S3, recording vault uploads and removing uploaded files.
//!
//! # Modules
//!
//! - `backup`: locating and removing local backup files
//! - `storage`: Glacier and S3 clients behind a single `Destination`
//! - `history`: append-only record of stored archives
//! - `uploader`: the per-run orchestration

pub mod backup;
pub mod config;
pub mod error;
pub mod history;
pub mod storage;
pub mod telemetry;
pub mod uploader;

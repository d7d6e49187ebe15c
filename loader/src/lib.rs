//! Service loader library.
//!
//! Fetches a platform-specific release archive from an S3 bucket, checks it
//! against the SHA-256 digest published next to it, and writes it to disk
//! only when the digests match. It backs the `service-loader` binary and
//! can be driven directly with any [`storage::ObjectStore`].
//!
//! # Modules
//!
//! - [`artefact`] - Object key naming and digest records
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Run configuration resolved from the CLI
//! - [`error`] - Semantic error types
//! - [`fetch`] - The verified fetch
//! - [`logging`] - Stderr log subscriber for the binary
//! - [`output`] - User-facing messages
//! - [`platform`] - Target platform resolution
//! - [`storage`] - Object storage access and the S3 client

pub mod artefact;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod platform;
pub mod storage;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

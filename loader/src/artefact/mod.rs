//! Artefact naming, digest records, and digest values.
//!
//! # Sub-modules
//!
//! - [`digest_record`] - Parsing of published `.sha256` records.
//! - [`error`] - Semantic error types for validation failures.
//! - [`naming`] - Object key derivation (`ArtefactKey`).
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).

pub mod digest_record;
pub mod error;
pub mod naming;
pub mod sha256_digest;

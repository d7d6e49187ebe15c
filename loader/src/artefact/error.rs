//! Error types for artefact keys, digest records, and digest values.
//!
//! Each variant identifies the rejected input and the constraint it
//! violated.

use thiserror::Error;

/// Errors arising from invalid artefact-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtefactError {
    /// The digest record held no whitespace-delimited token.
    #[error("digest record is empty")]
    EmptyDigestRecord,

    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`ArtefactError`].
pub type Result<T> = std::result::Result<T, ArtefactError>;

//! Error types for the service loader.
//!
//! Every failure is terminal for a run. Variants keep distinct messages so
//! the printed error identifies its class, and [`LoaderError::kind`]
//! exposes the same classification to programmatic callers.

use crate::artefact::error::ArtefactError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching and verifying a release.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The storage client could not be constructed from its configuration.
    #[error("invalid storage client configuration: {reason}")]
    ClientConfig {
        /// Description of the configuration problem.
        reason: String,
    },

    /// A requested object does not exist in the bucket.
    #[error("object {key} not found in bucket {bucket}")]
    ObjectNotFound {
        /// The bucket that was queried.
        bucket: String,
        /// The missing object key.
        key: String,
    },

    /// Reading an object failed for a reason other than absence.
    #[error("failed to read object {key} from bucket {bucket}: {reason}")]
    StorageRead {
        /// The bucket that was queried.
        bucket: String,
        /// The object key being read.
        key: String,
        /// Description of the transport or I/O failure.
        reason: String,
    },

    /// The digest record could not be interpreted.
    #[error("malformed digest record {key}")]
    DigestRecord {
        /// The object key of the digest record.
        key: String,
        /// The underlying validation error.
        #[source]
        source: ArtefactError,
    },

    /// The archive's digest differs from the published digest.
    #[error("checksum mismatch for {key}: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        /// The object key of the archive.
        key: String,
        /// The digest published in the digest record.
        expected: String,
        /// The digest computed over the downloaded bytes.
        actual: String,
    },

    /// The local output file could not be created.
    #[error("failed to create {}", path.display())]
    FileCreate {
        /// The path being created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the verified archive to disk failed.
    #[error("failed to write {}", path.display())]
    FileWrite {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`LoaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Storage client construction failed.
    ClientConfig,
    /// An object was missing.
    NotFound,
    /// An object read failed.
    StorageRead,
    /// The digest record was empty or malformed.
    DigestFormat,
    /// The archive failed verification.
    ChecksumMismatch,
    /// The output file could not be created.
    FileCreate,
    /// The output file could not be written.
    FileWrite,
}

impl LoaderError {
    /// Return the class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientConfig { .. } => ErrorKind::ClientConfig,
            Self::ObjectNotFound { .. } => ErrorKind::NotFound,
            Self::StorageRead { .. } => ErrorKind::StorageRead,
            Self::DigestRecord { .. } => ErrorKind::DigestFormat,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::FileCreate { .. } => ErrorKind::FileCreate,
            Self::FileWrite { .. } => ErrorKind::FileWrite,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ClientConfig => "client-config",
            Self::NotFound => "not-found",
            Self::StorageRead => "storage-read",
            Self::DigestFormat => "digest-format",
            Self::ChecksumMismatch => "checksum-mismatch",
            Self::FileCreate => "file-create",
            Self::FileWrite => "file-write",
        };
        f.write_str(label)
    }
}

/// Result type alias using [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;

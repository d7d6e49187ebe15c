//! Object storage access.
//!
//! The verified fetch needs exactly one capability from a storage backend:
//! read a whole object by bucket and key. [`ObjectStore`] captures that
//! capability so tests can substitute an in-memory store, and [`s3`]
//! provides the production implementation over the S3 REST API.
//!
//! # Sub-modules
//!
//! - [`s3`] - Blocking S3 client: `rusty-s3` presigns, `ureq` transfers.

pub mod s3;

/// Read access to a key-addressed object store.
///
/// # Examples
///
/// ```
/// use service_loader::storage::{ObjectStore, StorageError};
///
/// struct Empty;
///
/// impl ObjectStore for Empty {
///     fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
///         Err(StorageError::NotFound {
///             bucket: bucket.to_owned(),
///             key: key.to_owned(),
///         })
///     }
/// }
///
/// assert!(Empty.get_object("releases", "missing.tar.gz").is_err());
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStore {
    /// Read the object stored under `key` in `bucket` completely.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no such object exists, or
    /// another variant when the request or the body read fails.
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// Errors arising from object storage reads.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested object does not exist.
    #[error("object {key} not found in bucket {bucket}")]
    NotFound {
        /// The bucket that was queried.
        bucket: String,
        /// The missing object key.
        key: String,
    },

    /// The request failed or returned an unexpected status.
    #[error("request to {url} failed: {reason}")]
    Request {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// Reading the response body failed.
    #[error("I/O error reading object body: {0}")]
    Io(#[from] std::io::Error),
}

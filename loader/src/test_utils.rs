//! Shared test utilities for the loader crate.

use crate::artefact::sha256_digest::Sha256Digest;
use crate::storage::{ObjectStore, StorageError};
use std::cell::RefCell;
use std::collections::HashMap;

/// Return the lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256Digest::of(bytes).into_inner()
}

/// Build a `sha256sum`-style digest record for `contents`.
///
/// The record has the form `<hex digest>  <file_name>\n`.
#[must_use]
pub fn digest_record(contents: &[u8], file_name: &str) -> Vec<u8> {
    format!("{}  {file_name}\n", sha256_hex(contents)).into_bytes()
}

/// An [`ObjectStore`] serving objects from memory.
///
/// Every key requested through [`ObjectStore::get_object`] is recorded, in
/// order, so tests can assert which reads happened.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    objects: HashMap<(String, String), Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return the store.
    #[must_use]
    pub fn with_object(mut self, bucket: &str, key: &str, contents: impl AsRef<[u8]>) -> Self {
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            contents.as_ref().to_vec(),
        );
        self
    }

    /// Return the keys requested so far, in request order.
    #[must_use]
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl ObjectStore for InMemoryStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.requested.borrow_mut().push(key.to_owned());
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            })
    }
}

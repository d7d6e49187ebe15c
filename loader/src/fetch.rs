//! Verified fetch of a release archive.
//!
//! The archive and its digest record are both read completely into memory.
//! The archive is hashed only after the full buffer is assembled, and the
//! output file is written only when the computed digest equals the
//! published one. On any failure nothing is written and any existing file
//! under the output name is left untouched.

use crate::artefact::digest_record::DigestRecord;
use crate::artefact::naming::ArtefactKey;
use crate::artefact::sha256_digest::Sha256Digest;
use crate::error::{LoaderError, Result};
use crate::storage::{ObjectStore, StorageError};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix of the temporary file the archive is staged in before renaming.
const STAGING_PREFIX: &str = ".service-loader-";

/// What to fetch and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The bucket holding the release objects.
    pub bucket: String,
    /// The release identity and platform.
    pub key: ArtefactKey,
}

/// The result of a successful verified fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Path of the written archive.
    pub path: PathBuf,
    /// The application name of the release.
    pub app_name: String,
    /// The tag of the release.
    pub tag_name: String,
    /// The archive's base name without suffix.
    pub base_name: String,
    /// The verified digest of the archive.
    pub digest: Sha256Digest,
}

/// Fetch the archive for `request`, verify it, and write it to `dest_dir`.
///
/// The content object is read first; the digest record is only requested
/// once the content is in memory. The file is named after the content key.
/// It is staged in a temporary file inside `dest_dir` and renamed into
/// place, so an existing file is replaced only by verified content.
///
/// # Errors
///
/// - [`LoaderError::ObjectNotFound`] / [`LoaderError::StorageRead`] when
///   either object cannot be read.
/// - [`LoaderError::DigestRecord`] when the digest record is empty.
/// - [`LoaderError::ChecksumMismatch`] when the digests differ.
/// - [`LoaderError::FileCreate`] / [`LoaderError::FileWrite`] when the
///   output cannot be written.
///
/// # Examples
///
/// ```
/// use service_loader::artefact::naming::ArtefactKey;
/// use service_loader::fetch::{FetchRequest, fetch_and_verify};
/// use service_loader::platform::Platform;
/// use service_loader::test_utils::{InMemoryStore, digest_record};
///
/// let key = ArtefactKey::new("widget", "v1.2.3", Platform::new("darwin", "arm64"));
/// let store = InMemoryStore::new()
///     .with_object("releases", &key.content_key(), b"hello")
///     .with_object("releases", &key.digest_key(), digest_record(b"hello", &key.content_key()));
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// let request = FetchRequest { bucket: "releases".to_owned(), key };
/// let outcome = fetch_and_verify(&store, &request, dir.path()).expect("verified");
/// assert_eq!(std::fs::read(&outcome.path).expect("written"), b"hello");
/// ```
pub fn fetch_and_verify(
    store: &dyn ObjectStore,
    request: &FetchRequest,
    dest_dir: &Path,
) -> Result<FetchOutcome> {
    let content_key = request.key.content_key();
    let digest_key = request.key.digest_key();

    info!("fetching {content_key} from bucket {}", request.bucket);
    let content = read_object(store, &request.bucket, &content_key)?;
    debug!("read {} bytes of {content_key}", content.len());

    let record_bytes = read_object(store, &request.bucket, &digest_key)?;
    let record = DigestRecord::parse(&record_bytes).map_err(|source| LoaderError::DigestRecord {
        key: digest_key.clone(),
        source,
    })?;
    if let Err(err) = record.digest() {
        warn!("digest record {digest_key} does not hold a SHA-256 digest: {err}");
    }

    let actual = Sha256Digest::of(&content);
    if !record.matches(&actual) {
        return Err(LoaderError::ChecksumMismatch {
            key: content_key,
            expected: record.expected().to_owned(),
            actual: actual.into_inner(),
        });
    }
    debug!("{content_key} matches published digest {actual}");

    let path = persist(dest_dir, &content_key, &content)?;
    info!("wrote {}", path.display());

    Ok(FetchOutcome {
        path,
        app_name: request.key.app_name().to_owned(),
        tag_name: request.key.tag_name().to_owned(),
        base_name: request.key.base_name(),
        digest: actual,
    })
}

fn read_object(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<Vec<u8>> {
    store
        .get_object(bucket, key)
        .map_err(|err| storage_error(bucket, key, err))
}

/// Attach bucket and key context to a storage failure.
fn storage_error(bucket: &str, key: &str, err: StorageError) -> LoaderError {
    match err {
        StorageError::NotFound { .. } => LoaderError::ObjectNotFound {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        },
        other => LoaderError::StorageRead {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// Write `contents` to `dest_dir/file_name` via a temporary file and rename.
fn persist(dest_dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    let path = dest_dir.join(file_name);

    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut staged = builder
        .tempfile_in(dest_dir)
        .map_err(|source| LoaderError::FileCreate {
            path: path.clone(),
            source,
        })?;

    let write_error = |source: std::io::Error| LoaderError::FileWrite {
        path: path.clone(),
        source,
    };
    staged.write_all(contents).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged
        .persist(&path)
        .map_err(|err| write_error(err.error))?;

    Ok(path)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;

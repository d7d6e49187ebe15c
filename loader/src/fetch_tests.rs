//! Unit tests for the verified fetch.

use super::*;
use crate::artefact::error::ArtefactError;
use crate::error::ErrorKind;
use crate::platform::Platform;
use crate::storage::MockObjectStore;
use crate::test_utils::{InMemoryStore, digest_record, sha256_hex};
use mockall::Sequence;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const BUCKET: &str = "releases";
const ARCHIVE: &[u8] = b"hello";
const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[fixture]
fn request() -> FetchRequest {
    FetchRequest {
        bucket: BUCKET.to_owned(),
        key: ArtefactKey::new("widget", "v1.2.3", Platform::new("darwin", "arm64")),
    }
}

#[fixture]
fn dest() -> TempDir {
    tempfile::tempdir().expect("temp dir")
}

fn store_with(request: &FetchRequest, content: &[u8], record: &[u8]) -> InMemoryStore {
    InMemoryStore::new()
        .with_object(BUCKET, &request.key.content_key(), content)
        .with_object(BUCKET, &request.key.digest_key(), record)
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[rstest]
fn writes_verified_archive(request: FetchRequest, dest: TempDir) {
    let record = format!("{HELLO_SHA256}  widget_v1.2.3_darwin_arm64.tar.gz\n");
    let store = store_with(&request, ARCHIVE, record.as_bytes());

    let outcome = fetch_and_verify(&store, &request, dest.path()).expect("verified fetch");

    assert_eq!(
        outcome.path,
        dest.path().join("widget_v1.2.3_darwin_arm64.tar.gz")
    );
    assert_eq!(std::fs::read(&outcome.path).expect("read output"), ARCHIVE);
    assert_eq!(outcome.app_name, "widget");
    assert_eq!(outcome.tag_name, "v1.2.3");
    assert_eq!(outcome.base_name, "widget_v1.2.3_darwin_arm64");
    assert_eq!(outcome.digest.as_str(), HELLO_SHA256);
    assert_eq!(
        dir_entries(dest.path()),
        vec!["widget_v1.2.3_darwin_arm64.tar.gz".to_owned()]
    );
}

#[rstest]
fn reads_content_before_digest(request: FetchRequest, dest: TempDir) {
    let mut store = MockObjectStore::new();
    let mut seq = Sequence::new();
    store
        .expect_get_object()
        .withf(|bucket, key| bucket == BUCKET && key.ends_with(".tar.gz"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(ARCHIVE.to_vec()));
    store
        .expect_get_object()
        .withf(|bucket, key| bucket == BUCKET && key.ends_with(".sha256"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(format!("{HELLO_SHA256}\n").into_bytes()));

    fetch_and_verify(&store, &request, dest.path()).expect("verified fetch");
}

#[rstest]
fn missing_content_skips_digest_read(request: FetchRequest, dest: TempDir) {
    let store = InMemoryStore::new();

    let err = fetch_and_verify(&store, &request, dest.path()).expect_err("content is missing");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(
        matches!(&err, LoaderError::ObjectNotFound { bucket, key }
            if bucket == BUCKET && *key == request.key.content_key()),
        "unexpected error: {err:?}"
    );
    assert_eq!(store.requested_keys(), vec![request.key.content_key()]);
    assert!(dir_entries(dest.path()).is_empty());
}

#[rstest]
fn missing_digest_record_writes_nothing(request: FetchRequest, dest: TempDir) {
    let store = InMemoryStore::new().with_object(BUCKET, &request.key.content_key(), ARCHIVE);

    let err = fetch_and_verify(&store, &request, dest.path()).expect_err("digest is missing");

    assert!(
        matches!(&err, LoaderError::ObjectNotFound { key, .. } if *key == request.key.digest_key()),
        "unexpected error: {err:?}"
    );
    assert_eq!(
        store.requested_keys(),
        vec![request.key.content_key(), request.key.digest_key()]
    );
    assert!(dir_entries(dest.path()).is_empty());
}

#[rstest]
fn read_failure_is_reported_with_context(request: FetchRequest, dest: TempDir) {
    let mut store = MockObjectStore::new();
    store.expect_get_object().times(1).returning(|_, _| {
        Err(StorageError::Request {
            url: "https://s3.amazonaws.com/releases/x".to_owned(),
            reason: "connection reset".to_owned(),
        })
    });

    let err = fetch_and_verify(&store, &request, dest.path()).expect_err("read fails");

    assert_eq!(err.kind(), ErrorKind::StorageRead);
    let msg = err.to_string();
    assert!(msg.contains("connection reset"), "message: {msg}");
    assert!(msg.contains(&request.key.content_key()), "message: {msg}");
    assert!(dir_entries(dest.path()).is_empty());
}

#[rstest]
#[case::empty(b"".as_slice())]
#[case::whitespace_only(b" \n\t\n".as_slice())]
fn empty_digest_record_is_rejected(
    request: FetchRequest,
    dest: TempDir,
    #[case] record: &[u8],
) {
    let store = store_with(&request, ARCHIVE, record);

    let err = fetch_and_verify(&store, &request, dest.path()).expect_err("record is empty");

    assert!(
        matches!(
            &err,
            LoaderError::DigestRecord { source: ArtefactError::EmptyDigestRecord, .. }
        ),
        "unexpected error: {err:?}"
    );
    assert!(dir_entries(dest.path()).is_empty());
}

#[rstest]
#[case::tampered_content(b"hellp".as_slice(), HELLO_SHA256.to_owned())]
#[case::uppercase_digest(ARCHIVE, HELLO_SHA256.to_uppercase())]
#[case::truncated_digest(ARCHIVE, HELLO_SHA256.chars().take(63).collect::<String>())]
fn mismatch_writes_nothing(
    request: FetchRequest,
    dest: TempDir,
    #[case] content: &[u8],
    #[case] published: String,
) {
    let store = store_with(&request, content, published.as_bytes());

    let err = fetch_and_verify(&store, &request, dest.path()).expect_err("digests differ");

    match &err {
        LoaderError::ChecksumMismatch {
            expected, actual, ..
        } => {
            assert_eq!(*expected, published);
            assert_eq!(*actual, sha256_hex(content));
        }
        other => panic!("expected ChecksumMismatch, got {other:?}"),
    }
    assert!(dir_entries(dest.path()).is_empty());
}

#[rstest]
fn mismatch_leaves_existing_file_untouched(request: FetchRequest, dest: TempDir) {
    let existing = dest.path().join(request.key.content_key());
    std::fs::write(&existing, b"previous release").expect("seed existing file");
    let store = store_with(&request, b"tampered", &digest_record(ARCHIVE, "x"));

    fetch_and_verify(&store, &request, dest.path()).expect_err("digests differ");

    assert_eq!(
        std::fs::read(&existing).expect("read existing"),
        b"previous release"
    );
    assert_eq!(dir_entries(dest.path()), vec![request.key.content_key()]);
}

#[rstest]
fn verified_archive_replaces_existing_file(request: FetchRequest, dest: TempDir) {
    let existing = dest.path().join(request.key.content_key());
    std::fs::write(&existing, b"previous release").expect("seed existing file");
    let store = store_with(&request, ARCHIVE, &digest_record(ARCHIVE, "x"));

    let outcome = fetch_and_verify(&store, &request, dest.path()).expect("verified fetch");

    assert_eq!(outcome.path, existing);
    assert_eq!(std::fs::read(&existing).expect("read output"), ARCHIVE);
    assert_eq!(dir_entries(dest.path()), vec![request.key.content_key()]);
}

#[rstest]
fn empty_archive_with_matching_digest_is_written(request: FetchRequest, dest: TempDir) {
    let store = store_with(&request, b"", &digest_record(b"", "empty.tar.gz"));

    let outcome = fetch_and_verify(&store, &request, dest.path()).expect("verified fetch");

    assert!(std::fs::read(&outcome.path).expect("read output").is_empty());
}

#[rstest]
fn missing_destination_directory_is_a_create_error(request: FetchRequest, dest: TempDir) {
    let missing = dest.path().join("absent");
    let store = store_with(&request, ARCHIVE, &digest_record(ARCHIVE, "x"));

    let err = fetch_and_verify(&store, &request, &missing).expect_err("directory is missing");

    assert_eq!(err.kind(), ErrorKind::FileCreate);
    assert!(
        err.to_string().contains("widget_v1.2.3_darwin_arm64.tar.gz"),
        "message: {err}"
    );
}

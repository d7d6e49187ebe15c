//! Service loader CLI entrypoint.
//!
//! Resolves configuration, runs one verified fetch into the current
//! directory, and reports the result. Exit status is `0` on success and `1`
//! on any failure.

use clap::Parser;
use service_loader::cli::Cli;
use service_loader::config::LoaderConfig;
use service_loader::error::Result;
use service_loader::fetch::{FetchRequest, fetch_and_verify};
use service_loader::output::{error_report, outcome_message};
use service_loader::platform::Platform;
use service_loader::storage::ObjectStore;
use service_loader::storage::s3::S3Client;
use std::io::Write;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    let config = LoaderConfig::from_cli(&cli);
    service_loader::logging::init(config.verbosity, config.quiet);

    // Read after logging is up so a partial override warning is visible.
    let request = config.fetch_request(Platform::from_env());
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&config, &request, Path::new("."), &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    config: &LoaderConfig,
    request: &FetchRequest,
    dest_dir: &Path,
    stdout: &mut dyn Write,
) -> Result<()> {
    let client = S3Client::new(&config.storage)?;
    run_with(&client, request, dest_dir, stdout)
}

fn run_with(
    store: &dyn ObjectStore,
    request: &FetchRequest,
    dest_dir: &Path,
    stdout: &mut dyn Write,
) -> Result<()> {
    let outcome = fetch_and_verify(store, request, dest_dir)?;
    write_line(stdout, outcome_message(&outcome));
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format!("error: {}", error_report(&err)));
            1
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_loader::error::{ErrorKind, LoaderError};
    use service_loader::test_utils::{InMemoryStore, digest_record};

    fn config(endpoint: &str) -> LoaderConfig {
        let cli = Cli::parse_from([
            "service-loader",
            "-b",
            "releases",
            "--endpoint",
            endpoint,
            "widget",
            "v1.2.3",
        ]);
        LoaderConfig::from_cli(&cli)
    }

    fn request(config: &LoaderConfig) -> FetchRequest {
        config.fetch_request(Platform::new("linux", "amd64"))
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = LoaderError::ChecksumMismatch {
            key: "widget_v1.2.3_linux_amd64.tar.gz".to_owned(),
            expected: "aaaa".to_owned(),
            actual: "bbbb".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.starts_with("error: checksum mismatch"));
        assert!(stderr_text.ends_with('\n'));
    }

    #[test]
    fn run_with_prints_success_line_only() {
        let request = request(&config("https://s3.amazonaws.com"));
        let content_key = request.key.content_key();
        let store = InMemoryStore::new()
            .with_object("releases", &content_key, b"archive")
            .with_object(
                "releases",
                &request.key.digest_key(),
                digest_record(b"archive", &content_key),
            );
        let dir = tempfile::tempdir().expect("temp dir");
        let mut stdout = Vec::new();

        run_with(&store, &request, dir.path(), &mut stdout).expect("verified fetch");

        let stdout_text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        assert_eq!(
            stdout_text,
            "Downloaded the v1.2.3 release of widget to widget_v1.2.3_linux_amd64.tar.gz.\n"
        );
        assert!(dir.path().join(&content_key).is_file());
    }

    #[test]
    fn run_with_prints_nothing_on_failure() {
        let request = request(&config("https://s3.amazonaws.com"));
        let dir = tempfile::tempdir().expect("temp dir");
        let mut stdout = Vec::new();

        let err = run_with(&InMemoryStore::new(), &request, dir.path(), &mut stdout)
            .expect_err("objects are missing");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(stdout.is_empty());
    }

    #[test]
    fn run_rejects_invalid_endpoint_before_any_request() {
        let config = config("ftp://example.test");
        let dir = tempfile::tempdir().expect("temp dir");
        let mut stdout = Vec::new();

        let err = run(&config, &request(&config), dir.path(), &mut stdout)
            .expect_err("endpoint is invalid");

        assert_eq!(err.kind(), ErrorKind::ClientConfig);
        assert!(stdout.is_empty());
    }
}

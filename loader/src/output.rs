//! User-facing messages for the loader CLI.

use crate::fetch::FetchOutcome;
use std::error::Error;

/// Format the confirmation printed after a verified download.
///
/// # Examples
///
/// ```
/// use service_loader::output::success_message;
///
/// assert_eq!(
///     success_message("widget", "v1.2.3", "widget_v1.2.3_linux_amd64"),
///     "Downloaded the v1.2.3 release of widget to widget_v1.2.3_linux_amd64.tar.gz."
/// );
/// ```
#[must_use]
pub fn success_message(app_name: &str, tag_name: &str, base_name: &str) -> String {
    format!("Downloaded the {tag_name} release of {app_name} to {base_name}.tar.gz.")
}

/// Format the confirmation for a completed fetch.
#[must_use]
pub fn outcome_message(outcome: &FetchOutcome) -> String {
    success_message(&outcome.app_name, &outcome.tag_name, &outcome.base_name)
}

/// Render an error and its chain of sources on one line.
///
/// Sources are appended in order, separated by `": "`.
///
/// # Examples
///
/// ```
/// use service_loader::artefact::error::ArtefactError;
/// use service_loader::error::LoaderError;
/// use service_loader::output::error_report;
///
/// let err = LoaderError::DigestRecord {
///     key: "widget.sha256".to_owned(),
///     source: ArtefactError::EmptyDigestRecord,
/// };
/// assert_eq!(
///     error_report(&err),
///     "malformed digest record widget.sha256: digest record is empty"
/// );
/// ```
#[must_use]
pub fn error_report(err: &(dyn Error + 'static)) -> String {
    let mut report = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str(": ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report
}

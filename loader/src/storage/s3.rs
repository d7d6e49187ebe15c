//! Blocking S3 client.
//!
//! Objects are read with path-style `GET {endpoint}/{bucket}/{key}` requests
//! on a `ureq` agent. When credentials are configured each URL is presigned
//! with `rusty-s3` (Signature Version 4 query authentication); otherwise the
//! request is anonymous, which suits public buckets.
//!
//! Bodies are returned exactly as stored. The agent does no content
//! decoding, so an object served with `Content-Encoding: gzip` reaches the
//! digest check byte for byte.

use super::{ObjectStore, StorageError};
use crate::error::{LoaderError, Result};
use log::debug;
use rusty_s3::{Bucket, Credentials, S3Action, UrlStyle};
use std::fmt;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://s3.amazonaws.com";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// How long a presigned URL stays valid.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(300);

/// Header S3 uses to report where a bucket actually lives.
const BUCKET_REGION_HEADER: &str = "x-amz-bucket-region";

/// Connection settings for an S3-compatible service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// Base URL of the service, e.g. `https://s3.amazonaws.com`.
    pub endpoint: String,
    /// Region used in the signature scope.
    pub region: String,
    /// Access key id; must be paired with a secret.
    pub access_key_id: Option<String>,
    /// Secret access key; must be paired with an access key id.
    pub secret_access_key: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            region: DEFAULT_REGION.to_owned(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

/// An [`ObjectStore`] backed by the S3 REST API.
pub struct S3Client {
    agent: ureq::Agent,
    endpoint: Url,
    region: String,
    credentials: Option<Credentials>,
}

impl S3Client {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ClientConfig`] when the endpoint is not an
    /// `http`/`https` URL with a host and no path, or when only one half of
    /// the credential pair is supplied.
    pub fn new(config: &S3Config) -> Result<Self> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let credentials = resolve_credentials(
            config.access_key_id.as_deref(),
            config.secret_access_key.as_deref(),
        )?;
        if credentials.is_none() {
            debug!("no credentials configured; sending anonymous requests");
        }

        // Statuses are checked by hand so error responses keep their headers.
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: ureq::Agent::new_with_config(agent_config),
            endpoint,
            region: config.region.clone(),
            credentials,
        })
    }

    /// Return the URL requested for `key` in `bucket`.
    ///
    /// With credentials configured the URL is presigned for
    /// [`PRESIGN_EXPIRY`] from now.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Request`] when no URL can be formed for the
    /// bucket and key.
    pub fn object_url(&self, bucket: &str, key: &str) -> std::result::Result<Url, StorageError> {
        let invalid = |reason: String| StorageError::Request {
            url: format!("{}{bucket}/{key}", self.endpoint),
            reason,
        };
        let target = Bucket::new(
            self.endpoint.clone(),
            UrlStyle::Path,
            bucket.to_owned(),
            self.region.clone(),
        )
        .map_err(|err| invalid(format!("invalid bucket: {err}")))?;

        match &self.credentials {
            Some(credentials) => Ok(target
                .get_object(Some(credentials), key)
                .sign(PRESIGN_EXPIRY)),
            None => target
                .object_url(key)
                .map_err(|err| invalid(format!("invalid object key: {err}"))),
        }
    }
}

impl fmt::Debug for S3Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Client")
            .field("endpoint", &self.endpoint.as_str())
            .field("region", &self.region)
            .field(
                "access_key_id",
                &self.credentials.as_ref().map(Credentials::key),
            )
            .finish_non_exhaustive()
    }
}

impl ObjectStore for S3Client {
    fn get_object(&self, bucket: &str, key: &str) -> std::result::Result<Vec<u8>, StorageError> {
        let url = self.object_url(bucket, key)?;
        let shown = without_query(&url);
        debug!("GET {shown}");

        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|err| StorageError::Request {
                url: shown.clone(),
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let bucket_region = response
                .headers()
                .get(BUCKET_REGION_HEADER)
                .and_then(|value| value.to_str().ok());
            return Err(status_error(
                &ObjectRef { bucket, key, url: &shown },
                status.as_u16(),
                &self.region,
                bucket_region,
            ));
        }

        let mut body = Vec::new();
        response
            .into_body()
            .as_reader()
            .read_to_end(&mut body)
            .map_err(StorageError::Io)?;
        debug!("read {} bytes from {shown}", body.len());
        Ok(body)
    }
}

/// The object a failed response belongs to.
struct ObjectRef<'a> {
    bucket: &'a str,
    key: &'a str,
    url: &'a str,
}

/// Map a non-success status to a [`StorageError`].
///
/// A `bucket_region` that differs from the configured region is named in
/// the message, since S3 rejects requests signed for the wrong region.
fn status_error(
    object: &ObjectRef<'_>,
    status: u16,
    configured_region: &str,
    bucket_region: Option<&str>,
) -> StorageError {
    if status == 404 {
        return StorageError::NotFound {
            bucket: object.bucket.to_owned(),
            key: object.key.to_owned(),
        };
    }
    let reason = match bucket_region {
        Some(region) if region != configured_region => format!(
            "HTTP status {status}; bucket {} is in region {region}, not {configured_region}",
            object.bucket
        ),
        _ => format!("HTTP status {status}"),
    };
    StorageError::Request {
        url: object.url.to_owned(),
        reason,
    }
}

/// Render `url` without its query, which may carry a signature.
fn without_query(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.into()
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let endpoint = Url::parse(raw).map_err(|err| LoaderError::ClientConfig {
        reason: format!("invalid endpoint \"{raw}\": {err}"),
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(LoaderError::ClientConfig {
            reason: format!(
                "endpoint \"{raw}\" must use http or https, not {}",
                endpoint.scheme()
            ),
        });
    }
    if endpoint.host_str().is_none() {
        return Err(LoaderError::ClientConfig {
            reason: format!("endpoint \"{raw}\" has no host"),
        });
    }
    if endpoint.path() != "/" || endpoint.query().is_some() {
        return Err(LoaderError::ClientConfig {
            reason: format!("endpoint \"{raw}\" must not carry a path or query"),
        });
    }
    Ok(endpoint)
}

fn resolve_credentials(
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<Option<Credentials>> {
    let access_key_id = access_key_id.filter(|value| !value.is_empty());
    let secret_access_key = secret_access_key.filter(|value| !value.is_empty());
    match (access_key_id, secret_access_key) {
        (Some(id), Some(secret)) => Ok(Some(Credentials::new(id, secret))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(LoaderError::ClientConfig {
            reason: "access key id supplied without a secret access key".to_owned(),
        }),
        (None, Some(_)) => Err(LoaderError::ClientConfig {
            reason: "secret access key supplied without an access key id".to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "s3_tests.rs"]
mod tests;

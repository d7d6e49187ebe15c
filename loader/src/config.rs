//! Run configuration resolved from the command line and environment.

use crate::artefact::naming::ArtefactKey;
use crate::cli::Cli;
use crate::fetch::FetchRequest;
use crate::platform::Platform;
use crate::storage::s3::S3Config;

/// Everything a single run needs from the command line.
///
/// The target platform is supplied separately through
/// [`LoaderConfig::fetch_request`], so logging can be installed from this
/// value before the platform environment is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Bucket holding the release.
    pub bucket: String,
    /// Application name of the release.
    pub app_name: String,
    /// Release tag.
    pub tag_name: String,
    /// How to reach the storage service.
    pub storage: S3Config,
    /// Number of `-v` flags given.
    pub verbosity: u8,
    /// Whether `-q` was given.
    pub quiet: bool,
}

impl LoaderConfig {
    /// Build the configuration from parsed arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use service_loader::cli::Cli;
    /// use service_loader::config::LoaderConfig;
    /// use service_loader::platform::Platform;
    ///
    /// let cli = Cli::parse_from(["service-loader", "-b", "releases", "widget", "v1.2.3"]);
    /// let config = LoaderConfig::from_cli(&cli);
    /// let request = config.fetch_request(Platform::new("linux", "amd64"));
    /// assert_eq!(request.key.content_key(), "widget_v1.2.3_linux_amd64.tar.gz");
    /// ```
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            bucket: cli.bucket.clone(),
            app_name: cli.app_name.clone(),
            tag_name: cli.tag_name.clone(),
            storage: S3Config {
                endpoint: cli.endpoint.clone(),
                region: cli.region.clone(),
                access_key_id: cli.access_key_id.clone(),
                secret_access_key: cli.secret_access_key.clone(),
            },
            verbosity: cli.verbosity,
            quiet: cli.quiet,
        }
    }

    /// Describe the release to fetch for `platform`.
    #[must_use]
    pub fn fetch_request(&self, platform: Platform) -> FetchRequest {
        FetchRequest {
            bucket: self.bucket.clone(),
            key: ArtefactKey::new(self.app_name.as_str(), self.tag_name.as_str(), platform),
        }
    }
}

//! CLI argument definitions for the service loader.
//!
//! Parsing is kept apart from the entrypoint so the binary only wires
//! configuration, logging, and the fetch together.

use crate::storage::s3::{DEFAULT_ENDPOINT, DEFAULT_REGION};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

/// Download a release archive from S3 and keep it only if its SHA-256
/// matches the published digest.
#[derive(Parser, Debug, Clone)]
#[command(name = "service-loader")]
#[command(version, about)]
#[command(long_about = concat!(
    "Download a release archive from S3 and keep it only if its SHA-256 ",
    "matches the published digest.\n\n",
    "The archive key is {APP_NAME}_{TAG_NAME}_{GOOS}_{GOARCH}.tar.gz and the ",
    "digest record uses the same base name with a .sha256 suffix. GOOS and GOARCH ",
    "default to the host platform; set both environment variables to fetch ",
    "for another platform.\n\n",
    "The verified archive is written to the current directory.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Fetch the host build of a release:\n",
    "    $ service-loader -b releases widget v1.2.3\n\n",
    "  Fetch a Linux build from another machine:\n",
    "    $ GOOS=linux GOARCH=amd64 service-loader -b releases widget v1.2.3\n\n",
    "  Fetch from an S3-compatible service:\n",
    "    $ service-loader -b releases --endpoint http://localhost:9000 widget v1.2.3",
))]
pub struct Cli {
    /// Application name; the first component of the archive key.
    #[arg(value_name = "APP_NAME", value_parser = NonEmptyStringValueParser::new())]
    pub app_name: String,

    /// Release tag; the second component of the archive key.
    #[arg(value_name = "TAG_NAME", value_parser = NonEmptyStringValueParser::new())]
    pub tag_name: String,

    /// Bucket holding the release archives.
    #[arg(short, long, value_name = "BUCKET", value_parser = NonEmptyStringValueParser::new())]
    pub bucket: String,

    /// Access key id for signed requests.
    #[arg(long = "access_key_id", env = "AWS_ACCESS_KEY_ID", value_name = "ID")]
    pub access_key_id: Option<String>,

    /// Secret access key for signed requests.
    #[arg(
        long = "aws_secret_access_key",
        env = "AWS_SECRET_ACCESS_KEY",
        value_name = "SECRET",
        hide_env_values = true
    )]
    pub secret_access_key: Option<String>,

    /// Base URL of the S3 service.
    #[arg(long, env = "S3_ENDPOINT", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Region used to sign requests.
    #[arg(long, env = "AWS_REGION", value_name = "REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

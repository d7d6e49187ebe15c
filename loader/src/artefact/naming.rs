//! Object naming policy for published release artefacts.
//!
//! Every release is stored as a pair of objects sharing one base name,
//! `<app>_<tag>_<os>_<arch>`: the archive (`.tar.gz`) and its digest
//! record (`.sha256`).

use crate::platform::Platform;
use std::fmt;

/// Delimiter joining the components of the base name.
const KEY_DELIMITER: char = '_';

/// Suffix of the archive object.
const CONTENT_SUFFIX: &str = ".tar.gz";

/// Suffix of the digest record object.
const DIGEST_SUFFIX: &str = ".sha256";

/// The base name shared by a release archive and its digest record.
///
/// # Examples
///
/// ```
/// use service_loader::artefact::naming::ArtefactKey;
/// use service_loader::platform::Platform;
///
/// let key = ArtefactKey::new("widget", "v1.2.3", Platform::new("darwin", "arm64"));
/// assert_eq!(key.base_name(), "widget_v1.2.3_darwin_arm64");
/// assert_eq!(key.content_key(), "widget_v1.2.3_darwin_arm64.tar.gz");
/// assert_eq!(key.digest_key(), "widget_v1.2.3_darwin_arm64.sha256");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactKey {
    app_name: String,
    tag_name: String,
    platform: Platform,
}

impl ArtefactKey {
    /// Create a key from the release identity and a resolved platform.
    #[must_use]
    pub fn new(app_name: impl Into<String>, tag_name: impl Into<String>, platform: Platform) -> Self {
        Self {
            app_name: app_name.into(),
            tag_name: tag_name.into(),
            platform,
        }
    }

    /// Return the application name component.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Return the release tag component.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Return the platform the artefact was built for.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Return the base name without any suffix.
    #[must_use]
    pub fn base_name(&self) -> String {
        self.to_string()
    }

    /// Return the object key of the archive.
    #[must_use]
    pub fn content_key(&self) -> String {
        format!("{self}{CONTENT_SUFFIX}")
    }

    /// Return the object key of the digest record.
    #[must_use]
    pub fn digest_key(&self) -> String {
        format!("{self}{DIGEST_SUFFIX}")
    }
}

impl fmt::Display for ArtefactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{app}{d}{tag}{d}{os}{d}{arch}",
            app = self.app_name,
            tag = self.tag_name,
            os = self.platform.os(),
            arch = self.platform.arch(),
            d = KEY_DELIMITER,
        )
    }
}

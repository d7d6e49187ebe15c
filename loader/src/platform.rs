//! Target platform resolution.
//!
//! Release artefacts are named with Go-style platform identifiers
//! (`linux`, `darwin`, `amd64`, `arm64`, ...). The `GOOS` and `GOARCH`
//! environment variables select a platform other than the host, but only
//! when both are present and non-empty; otherwise both values come from the
//! host. The environment is read once by [`Platform::from_env`] and the
//! result is passed around as a plain value.

use log::{debug, warn};
use std::fmt;

/// Environment variable overriding the target operating system.
pub const GOOS_VAR: &str = "GOOS";

/// Environment variable overriding the target architecture.
pub const GOARCH_VAR: &str = "GOARCH";

/// An operating system and architecture pair using Go naming.
///
/// # Examples
///
/// ```
/// use service_loader::platform::Platform;
///
/// let platform = Platform::resolve(Some("linux".to_owned()), Some("amd64".to_owned()));
/// assert_eq!(platform, Platform::new("linux", "amd64"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    /// Create a platform from explicit values.
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Return the platform of the running process.
    #[must_use]
    pub fn host() -> Self {
        Self::new(
            go_os_name(std::env::consts::OS),
            go_arch_name(std::env::consts::ARCH, Endian::host()),
        )
    }

    /// Resolve the platform from optional overrides.
    ///
    /// Both overrides must be present and non-empty to take effect. When
    /// only one is usable it is ignored and the host platform is used for
    /// both fields; the values are never mixed.
    #[must_use]
    pub fn resolve(os_override: Option<String>, arch_override: Option<String>) -> Self {
        let os_override = os_override.filter(|value| !value.is_empty());
        let arch_override = arch_override.filter(|value| !value.is_empty());

        match (os_override, arch_override) {
            (Some(os), Some(arch)) => {
                debug!("using platform override {os}/{arch}");
                Self::new(os, arch)
            }
            (None, None) => Self::host(),
            (os, arch) => {
                let host = Self::host();
                warn!(
                    "ignoring partial platform override (GOOS={}, GOARCH={}); both must be set, using host platform {host}",
                    os.as_deref().unwrap_or(""),
                    arch.as_deref().unwrap_or(""),
                );
                host
            }
        }
    }

    /// Resolve the platform from `GOOS` and `GOARCH`.
    ///
    /// Call this once while building the run configuration.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(GOOS_VAR).ok(),
            std::env::var(GOARCH_VAR).ok(),
        )
    }

    /// Return the operating system name.
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Return the architecture name.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Translate a Rust `target_os` value to its Go `GOOS` spelling.
fn go_os_name(rust_os: &str) -> &str {
    match rust_os {
        "macos" => "darwin",
        other => other,
    }
}

/// Byte order of a target; Go folds it into some `GOARCH` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Big,
    Little,
}

impl Endian {
    const fn host() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }
}

/// Translate a Rust `target_arch` value to its Go `GOARCH` spelling.
fn go_arch_name(rust_arch: &str, endian: Endian) -> &str {
    match (rust_arch, endian) {
        ("x86_64", _) => "amd64",
        ("x86", _) => "386",
        ("aarch64", _) => "arm64",
        ("loongarch64", _) => "loong64",
        ("powerpc64", Endian::Little) => "ppc64le",
        ("powerpc64", Endian::Big) => "ppc64",
        ("mips64", Endian::Little) => "mips64le",
        ("mips", Endian::Little) => "mipsle",
        (other, _) => other,
    }
}

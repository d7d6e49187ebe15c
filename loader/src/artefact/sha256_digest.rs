//! Lowercase hex SHA-256 digests.

use super::error::{ArtefactError, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A 64-character lowercase hex SHA-256 digest.
///
/// Values come either from hashing bytes with [`Sha256Digest::of`] or from
/// parsing text, which enforces the same shape.
///
/// # Examples
///
/// ```
/// use service_loader::artefact::sha256_digest::Sha256Digest;
///
/// let digest = Sha256Digest::of(b"hello");
/// assert_eq!(
///     digest.as_str(),
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
/// );
/// assert_eq!(digest.as_str().parse::<Sha256Digest>(), Ok(digest));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Hash `bytes` in one pass.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Return the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest and return the hex string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Sha256Digest {
    type Err = ArtefactError;

    fn from_str(value: &str) -> Result<Self> {
        if value.len() != DIGEST_HEX_LEN {
            return Err(ArtefactError::InvalidSha256Digest {
                reason: format!(
                    "expected {DIGEST_HEX_LEN} hex characters, got {}",
                    value.len()
                ),
            });
        }
        match value
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            Some(c) if c.is_ascii_hexdigit() => Err(ArtefactError::InvalidSha256Digest {
                reason: "digest must be lowercase".to_owned(),
            }),
            Some(c) => Err(ArtefactError::InvalidSha256Digest {
                reason: format!("non-hex character '{c}'"),
            }),
            None => Ok(Self(value.to_owned())),
        }
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Parsing of published digest records.
//!
//! A digest record is the small text object stored next to an archive. Its
//! first whitespace-delimited token is the expected hex digest; anything
//! after it (conventionally the archive filename) is ignored, so both
//! `<digest>` and `sha256sum`-style `<digest>  <filename>` records parse.

use super::error::{ArtefactError, Result};
use super::sha256_digest::Sha256Digest;

/// The expected digest published for an archive.
///
/// The token is kept verbatim. No case folding or hex validation happens
/// here; a token that is not a lowercase SHA-256 digest simply fails to
/// match.
///
/// # Examples
///
/// ```
/// use service_loader::artefact::digest_record::DigestRecord;
///
/// let record = DigestRecord::parse(b"abc123  widget.tar.gz\n").expect("non-empty record");
/// assert_eq!(record.expected(), "abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRecord {
    expected: String,
}

impl DigestRecord {
    /// Parse a digest record from the raw object bytes.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::EmptyDigestRecord`] when the payload is
    /// empty or contains only whitespace.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        let expected = text
            .split_whitespace()
            .next()
            .ok_or(ArtefactError::EmptyDigestRecord)?;
        Ok(Self {
            expected: expected.to_owned(),
        })
    }

    /// Return the expected digest token.
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Interpret the expected token as a well-formed digest.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::InvalidSha256Digest`] when the token is not
    /// 64 lowercase hex characters.
    pub fn digest(&self) -> Result<Sha256Digest> {
        self.expected.parse()
    }

    /// Whether `actual` is exactly the published digest.
    ///
    /// The comparison is case-sensitive.
    #[must_use]
    pub fn matches(&self, actual: &Sha256Digest) -> bool {
        self.expected == actual.as_str()
    }
}

// ABOUTME: Validated git commit identifier.
// ABOUTME: Accepts full or abbreviated hexadecimal SHAs.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitShaError {
    #[error("commit sha cannot be empty")]
    Empty,

    #[error("commit sha exceeds maximum length of 64 characters")]
    TooLong,

    #[error("invalid character in commit sha: '{0}'")]
    InvalidChar(char),
}

/// A commit SHA as reported by the CI event, stored in lowercase. Matched
/// byte-for-byte against the `commit_ref` of provider deploys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn new(value: &str) -> Result<Self, CommitShaError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CommitShaError::Empty);
        }

        // SHA-256 object names are 64 hex digits
        if value.len() > 64 {
            return Err(CommitShaError::TooLong);
        }

        if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(CommitShaError::InvalidChar(c));
        }

        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

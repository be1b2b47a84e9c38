//! Content fingerprinting and change classification

use std::fmt;

use sha2::{Digest, Sha256};

/// Digest of a text payload, compared instead of the text itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of comparing the current fingerprint with the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Nothing stored yet
    Initial,
    Unchanged,
    Changed,
}

/// Hex SHA-256 of the UTF-8 text
pub fn fingerprint(text: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}

pub fn has_changed(previous: Option<&Fingerprint>, current: &Fingerprint) -> ChangeOutcome {
    match previous {
        None => ChangeOutcome::Initial,
        Some(previous) if previous == current => ChangeOutcome::Unchanged,
        Some(_) => ChangeOutcome::Changed,
    }
}

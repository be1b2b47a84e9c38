//! In-memory change baseline owned by the monitor loop

use crate::detector::Fingerprint;

/// The last fingerprint seen, if any. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    last_fingerprint: Option<Fingerprint>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fingerprint(&self) -> Option<&Fingerprint> {
        self.last_fingerprint.as_ref()
    }

    /// Replace the baseline
    pub fn record(&mut self, fingerprint: Fingerprint) {
        self.last_fingerprint = Some(fingerprint);
    }
}

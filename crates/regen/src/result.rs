use render::{ContrastReport, ContrastWarning, EncodedImage};
use serde::{Deserialize, Serialize};
use uri::PaymentUri;

/// The visible output of a coordinator.
///
/// Replaced wholesale on every applied generation, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub uri: PaymentUri,
    pub image: EncodedImage,
    /// Token of the generation that produced this result. `0` is the
    /// placeholder rendered at start-up.
    pub version: u64,
    /// True when a required field was borrowed from the placeholder input.
    pub placeholder_backed: bool,
    pub contrast: ContrastReport,
}

impl GenerationResult {
    /// Non-blocking scan-reliability warning for the colors used.
    pub fn advisory(&self) -> Option<ContrastWarning> {
        self.contrast.warning()
    }

    pub fn is_initial(&self) -> bool {
        self.version == 0
    }
}

/// Lifecycle of the newest edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Showing the start-up placeholder; nothing edited yet.
    Idle,
    /// Waiting for the edit burst to go quiet.
    Debouncing,
    /// The newest token is being built and encoded.
    Generating,
    /// The newest token finished, applied or failed.
    Settled,
}

impl Phase {
    /// True when no work is pending for the latest input.
    pub fn is_quiet(self) -> bool {
        matches!(self, Phase::Idle | Phase::Settled)
    }
}

/// Counters of generation outcomes since start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenStats {
    /// Tokens handed out at debounce expiry.
    pub issued: u64,
    /// Generations that became the visible result.
    pub applied: u64,
    /// Generations superseded before they could be applied.
    pub discarded: u64,
    /// Generations whose build or encode step failed.
    pub failed: u64,
}

impl RegenStats {
    /// Generations neither applied, discarded nor failed yet.
    pub fn in_flight(&self) -> u64 {
        self.issued
            .saturating_sub(self.applied + self.discarded + self.failed)
    }
}

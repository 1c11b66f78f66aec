use render::{ImageFormat, DEFAULT_MIN_CONTRAST_RATIO};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::RegenError;

/// Quiet interval an edit burst must end with before regeneration starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Knobs for a [`crate::Coordinator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenConfig {
    /// Debounce interval, serialized in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub debounce: Duration,
    /// Image format used by [`crate::Coordinator::start_builtin`].
    pub format: ImageFormat,
    /// Contrast ratio below which results carry an advisory.
    pub min_contrast_ratio: f64,
    /// Abort the previous in-flight generation when a newer one is issued.
    pub abort_superseded: bool,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            format: ImageFormat::Png,
            min_contrast_ratio: DEFAULT_MIN_CONTRAST_RATIO,
            abort_superseded: true,
        }
    }
}

impl RegenConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }

    /// Rejects contrast thresholds outside the WCAG range `1.0..=21.0`.
    pub fn validate(&self) -> Result<(), RegenError> {
        if !self.min_contrast_ratio.is_finite() || !(1.0..=21.0).contains(&self.min_contrast_ratio) {
            return Err(RegenError::InvalidConfig(format!(
                "min_contrast_ratio {} outside 1.0..=21.0",
                self.min_contrast_ratio
            )));
        }
        Ok(())
    }
}

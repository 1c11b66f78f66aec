//! Configuration for payment URI construction.
//!
//! [`UriConfig`] fixes the scheme, the currency tag, and the practical bounds
//! applied during sanitization. The defaults target UPI-style deep links.
//!
//! # Versioning
//!
//! Any change that alters the bytes produced for the same input must bump
//! `version`, so cached URIs keyed by value can be invalidated.
//!
//! ```rust
//! use uri::UriConfig;
//!
//! let config = UriConfig::default();
//! assert_eq!(config.scheme, "upi");
//! assert_eq!(config.currency, "INR");
//! assert!(config.validate().is_ok());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UriError;

/// Default per-transaction ceiling, in currency units.
pub const DEFAULT_MAX_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Runtime configuration for [`build_uri`](crate::build_uri).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UriConfig {
    /// Behavior version. Must be >= 1.
    pub version: u32,
    /// Deep-link scheme placed before `://pay`.
    pub scheme: String,
    /// ISO 4217 code emitted as the `cu` parameter.
    pub currency: String,
    /// Amounts above this ceiling are dropped from the URI.
    pub max_amount: Decimal,
    /// Payee names are truncated to this many characters.
    pub max_name_chars: usize,
    /// Notes are truncated to this many characters.
    pub max_note_chars: usize,
    /// Full URIs longer than this fall back to the minimal form.
    pub max_uri_bytes: usize,
}

impl Default for UriConfig {
    fn default() -> Self {
        Self {
            version: 1,
            scheme: "upi".to_string(),
            currency: "INR".to_string(),
            max_amount: DEFAULT_MAX_AMOUNT,
            max_name_chars: 50,
            max_note_chars: 100,
            max_uri_bytes: 1024,
        }
    }
}

impl UriConfig {
    /// Validate the configuration before building any URI.
    pub fn validate(&self) -> Result<(), UriError> {
        if self.version == 0 {
            return Err(UriError::InvalidConfig("version must be >= 1".into()));
        }
        let scheme_ok = self
            .scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self
                .scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok {
            return Err(UriError::InvalidConfig(format!(
                "scheme {:?} is not a valid uri scheme",
                self.scheme
            )));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(UriError::InvalidConfig(format!(
                "currency {:?} must be a 3-letter uppercase code",
                self.currency
            )));
        }
        if self.max_amount <= Decimal::ZERO {
            return Err(UriError::InvalidConfig("max_amount must be > 0".into()));
        }
        if self.max_name_chars == 0 || self.max_note_chars == 0 {
            return Err(UriError::InvalidConfig(
                "max_name_chars and max_note_chars must be >= 1".into(),
            ));
        }
        if self.max_uri_bytes == 0 {
            return Err(UriError::InvalidConfig("max_uri_bytes must be >= 1".into()));
        }
        Ok(())
    }

    /// Prefix every URI starts with, e.g. `upi://pay?`.
    pub fn prefix(&self) -> String {
        format!("{}://pay?", self.scheme)
    }
}

//! Error types produced by the uri crate.
//!
//! Only structural problems with the required fields surface as errors from
//! [`build_uri`](crate::build_uri). Optional-field irregularities (long notes,
//! amounts above the ceiling, decoration characters) are normalized or dropped
//! and never reach this type.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`MissingField`](UriError::MissingField) | Validation | Required field blank after trimming/sanitizing |
//! | [`InvalidPayeeId`](UriError::InvalidPayeeId) | Validation | Payee id does not match `local@domain` |
//! | [`TooLong`](UriError::TooLong) | Capacity | Even the minimal URI exceeds the byte ceiling |
//! | [`InvalidConfig`](UriError::InvalidConfig) | Configuration | [`UriConfig`](crate::UriConfig) failed validation |
//! | [`Malformed`](UriError::Malformed) | Parsing | String is not a payment URI of this shape |
use thiserror::Error;

/// Errors that can occur while building or parsing a payment URI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UriError {
    /// A required field was blank after trimming (or after sanitization for the name).
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The payee id did not match `local-part@domain-part`.
    #[error("invalid payee id: {0:?}")]
    InvalidPayeeId(String),

    /// The serialized URI exceeded the configured byte ceiling.
    #[error("payment uri is {len} bytes, exceeding the limit of {max}")]
    TooLong { len: usize, max: usize },

    /// Builder configuration is inconsistent.
    #[error("invalid uri config: {0}")]
    InvalidConfig(String),

    /// The input string is not a payment URI this crate understands.
    #[error("malformed payment uri: {0}")]
    Malformed(String),
}

impl UriError {
    /// True for errors caused by the caller's required fields.
    ///
    /// The regeneration coordinator uses this to tell "not enough input yet"
    /// apart from genuine failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, UriError::MissingField(_) | UriError::InvalidPayeeId(_))
    }
}

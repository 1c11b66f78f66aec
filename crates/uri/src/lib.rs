//! PayQR payment URI layer.
//!
//! Turns a raw [`PaymentFormInput`] into a [`PaymentUri`] deep link that
//! payment apps understand when scanned from a QR code.
//!
//! ## What we do
//!
//! - Normalize the payee id (trim, lowercase, `local@domain` check)
//! - Sanitize the payee name and note down to characters every scanner accepts
//! - Format the amount to two decimals, dropping it when it is not usable
//! - Serialize parameters in a fixed order with strict percent-encoding
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock-dependent output, no locale. Same input and config give
//! the same bytes on every machine, so URIs can be cached or diffed by value.
//!
//! ## Failure policy
//!
//! Only the required fields can fail a build. Optional irregularities are
//! normalized or silently dropped, because a QR code without a preset amount
//! is still useful while no QR code at all is not.
//!
//! ```rust
//! use uri::{build_uri, PaymentFormInput, UriConfig};
//!
//! let input = PaymentFormInput::new("  Shop@Bank ", "Shop Name!!")
//!     .with_amount("49.5");
//! let uri = build_uri(&input, &UriConfig::default()).unwrap();
//! assert_eq!(uri.param("pa").as_deref(), Some("shop@bank"));
//! assert_eq!(uri.param("am").as_deref(), Some("49.50"));
//! ```

mod amount;
mod builder;
mod config;
mod error;
mod input;
mod payee;
mod payment_uri;
mod sanitize;

pub use crate::amount::format_amount;
pub use crate::builder::{build_minimal_uri, build_uri, validate_required};
pub use crate::config::{UriConfig, DEFAULT_MAX_AMOUNT};
pub use crate::error::UriError;
pub use crate::input::{FormField, PaymentFormInput};
pub use crate::payee::normalize_payee_id;
pub use crate::payment_uri::{
    PaymentUri, PARAM_AMOUNT, PARAM_CURRENCY, PARAM_NOTE, PARAM_PAYEE_ID, PARAM_PAYEE_NAME,
    QUERY_VALUE,
};
pub use crate::sanitize::{collapse_whitespace, sanitize_name, sanitize_note, sanitize_text};

//! `PaymentFormInput -> PaymentUri`.
//!
//! The builder fails only on the required fields. Everything optional is
//! normalized or dropped:
//!
//! | Input | Outcome |
//! |-------|---------|
//! | blank `payee_id` / `payee_name` | [`UriError::MissingField`] |
//! | `payee_id` not `local@domain` | [`UriError::InvalidPayeeId`] |
//! | name or note with decoration characters | characters removed |
//! | name or note over the length bound | truncated |
//! | amount blank, unparsable, `<= 0`, over ceiling | `am` omitted |
//! | note empty after sanitization | `tn` omitted |
//! | full URI over `max_uri_bytes` | minimal URI (`pa`, `pn`, `cu`) |

use std::time::Instant;

use tracing::{debug, warn};

use crate::amount::format_amount;
use crate::config::UriConfig;
use crate::error::UriError;
use crate::input::PaymentFormInput;
use crate::payee::normalize_payee_id;
use crate::payment_uri::{
    PaymentUri, PARAM_AMOUNT, PARAM_CURRENCY, PARAM_NOTE, PARAM_PAYEE_ID, PARAM_PAYEE_NAME,
};
use crate::sanitize::{sanitize_name, sanitize_note};

/// Normalized required fields.
struct Required {
    payee_id: String,
    payee_name: String,
}

fn required_fields(input: &PaymentFormInput, max_name_chars: usize) -> Result<Required, UriError> {
    if input.payee_id.trim().is_empty() {
        return Err(UriError::MissingField("payee_id"));
    }
    if input.payee_name.trim().is_empty() {
        return Err(UriError::MissingField("payee_name"));
    }

    let payee_id = normalize_payee_id(&input.payee_id)?;
    let payee_name = sanitize_name(&input.payee_name, max_name_chars);
    if payee_name.is_empty() {
        return Err(UriError::MissingField("payee_name"));
    }

    Ok(Required {
        payee_id,
        payee_name,
    })
}

/// Checks only the required-field gate, without building anything.
pub fn validate_required(input: &PaymentFormInput) -> Result<(), UriError> {
    required_fields(input, usize::MAX).map(|_| ())
}

/// Builds the canonical payment URI for `input`.
///
/// Parameters are always emitted in the order `pa, pn, am, tn, cu`, so equal
/// input yields byte-identical output.
///
/// ```rust
/// use uri::{build_uri, PaymentFormInput, UriConfig};
///
/// let input = PaymentFormInput::new("shop@bank", "Shop Name!!").with_amount("49.5");
/// let uri = build_uri(&input, &UriConfig::default()).unwrap();
/// assert_eq!(
///     uri.as_str(),
///     "upi://pay?pa=shop@bank&pn=Shop%20Name&am=49.50&cu=INR"
/// );
/// ```
pub fn build_uri(input: &PaymentFormInput, cfg: &UriConfig) -> Result<PaymentUri, UriError> {
    let start = Instant::now();
    cfg.validate()?;
    let required = required_fields(input, cfg.max_name_chars)?;

    let amount = format_amount(&input.amount, cfg.max_amount);
    if amount.is_none() && !input.amount.trim().is_empty() {
        debug!(raw_amount = %input.amount.trim(), "amount_omitted");
    }
    let note = sanitize_note(&input.note, cfg.max_note_chars);

    let mut params: Vec<(&str, &str)> = Vec::with_capacity(5);
    params.push((PARAM_PAYEE_ID, required.payee_id.as_str()));
    params.push((PARAM_PAYEE_NAME, required.payee_name.as_str()));
    if let Some(amount) = amount.as_deref() {
        params.push((PARAM_AMOUNT, amount));
    }
    if let Some(note) = note.as_deref() {
        params.push((PARAM_NOTE, note));
    }
    params.push((PARAM_CURRENCY, cfg.currency.as_str()));

    let uri = PaymentUri::from_params(&cfg.prefix(), &params);
    if uri.len() > cfg.max_uri_bytes {
        warn!(
            len = uri.len(),
            max = cfg.max_uri_bytes,
            "payment_uri_fallback_minimal"
        );
        return minimal_from_required(&required, cfg);
    }

    debug!(
        len = uri.len(),
        has_amount = amount.is_some(),
        has_note = note.is_some(),
        elapsed_micros = start.elapsed().as_micros(),
        "payment_uri_built"
    );
    Ok(uri)
}

/// Builds the fallback URI carrying only `pa`, `pn` and `cu`.
pub fn build_minimal_uri(
    input: &PaymentFormInput,
    cfg: &UriConfig,
) -> Result<PaymentUri, UriError> {
    cfg.validate()?;
    let required = required_fields(input, cfg.max_name_chars)?;
    minimal_from_required(&required, cfg)
}

fn minimal_from_required(required: &Required, cfg: &UriConfig) -> Result<PaymentUri, UriError> {
    let uri = PaymentUri::from_params(
        &cfg.prefix(),
        &[
            (PARAM_PAYEE_ID, required.payee_id.as_str()),
            (PARAM_PAYEE_NAME, required.payee_name.as_str()),
            (PARAM_CURRENCY, cfg.currency.as_str()),
        ],
    );
    if uri.len() > cfg.max_uri_bytes {
        return Err(UriError::TooLong {
            len: uri.len(),
            max: cfg.max_uri_bytes,
        });
    }
    Ok(uri)
}

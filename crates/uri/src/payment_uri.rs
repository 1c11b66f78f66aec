//! The immutable payment URI value and its wire format.
//!
//! ```text
//! upi://pay?pa=shop@bank&pn=Shop%20Name&am=49.50&tn=Order%2017&cu=INR
//! ```
//!
//! Values are percent-encoded with [`QUERY_VALUE`]: every byte except
//! ASCII alphanumerics and `- . _ ~ @` becomes `%XX`. Spaces are always
//! `%20`, never `+`, because several scanner apps do not decode `+`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UriError;

/// Characters left literal inside query values.
pub const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

/// Payee address parameter.
pub const PARAM_PAYEE_ID: &str = "pa";
/// Payee name parameter.
pub const PARAM_PAYEE_NAME: &str = "pn";
/// Amount parameter, two decimal places.
pub const PARAM_AMOUNT: &str = "am";
/// Transaction note parameter.
pub const PARAM_NOTE: &str = "tn";
/// Currency parameter.
pub const PARAM_CURRENCY: &str = "cu";

/// A canonical payment deep link.
///
/// Values are only produced by [`build_uri`](crate::build_uri),
/// [`build_minimal_uri`](crate::build_minimal_uri) or by parsing, so the
/// string always has the `scheme://pay?...` shape with `pa`, `pn` and `cu`
/// present. It is never edited in place; new input yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentUri(String);

impl PaymentUri {
    /// Serializes ordered parameters behind `prefix` (`scheme://pay?`).
    pub(crate) fn from_params(prefix: &str, params: &[(&str, &str)]) -> Self {
        let mut out = prefix.to_string();
        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.extend(utf8_percent_encode(value, QUERY_VALUE));
        }
        PaymentUri(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn scheme(&self) -> &str {
        self.0.split_once("://").map_or("", |(scheme, _)| scheme)
    }

    fn query(&self) -> &str {
        self.0.split_once('?').map_or("", |(_, query)| query)
    }

    /// Decoded parameters in wire order.
    pub fn params(&self) -> Vec<(String, String)> {
        // Construction guarantees valid UTF-8 escapes; lossy decoding keeps this infallible.
        self.query()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (
                    key.to_string(),
                    percent_decode_str(value).decode_utf8_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Decoded value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Parameter names in wire order.
    pub fn keys(&self) -> Vec<String> {
        self.params().into_iter().map(|(k, _)| k).collect()
    }
}

fn parse(s: &str) -> Result<PaymentUri, UriError> {
    let (scheme, rest) = s
        .split_once("://")
        .ok_or_else(|| UriError::Malformed("missing scheme separator".into()))?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return Err(UriError::Malformed(format!("invalid scheme {scheme:?}")));
    }
    let query = rest
        .strip_prefix("pay?")
        .ok_or_else(|| UriError::Malformed("expected `pay?` authority".into()))?;

    let mut seen = Vec::new();
    for pair in query.split('&') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| UriError::Malformed(format!("parameter {pair:?} has no value")))?;
        percent_decode_str(value)
            .decode_utf8()
            .map_err(|e| UriError::Malformed(format!("parameter {key}: {e}")))?;
        seen.push(key);
    }

    for required in [PARAM_PAYEE_ID, PARAM_PAYEE_NAME, PARAM_CURRENCY] {
        if !seen.contains(&required) {
            return Err(UriError::Malformed(format!("missing `{required}` parameter")));
        }
    }

    Ok(PaymentUri(s.to_string()))
}

impl FromStr for PaymentUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<String> for PaymentUri {
    type Error = UriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}

impl From<PaymentUri> for String {
    fn from(value: PaymentUri) -> Self {
        value.0
    }
}

impl AsRef<str> for PaymentUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use crate::error::UriError;

fn is_id_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'
}

/// Trims, lowercases and validates a payee id against `local@domain`.
///
/// Both parts must be non-empty and use only letters, digits, `.` and `-`.
///
/// ```rust
/// use uri::normalize_payee_id;
///
/// assert_eq!(
///     normalize_payee_id("  User.Name@Provider  ").unwrap(),
///     "user.name@provider"
/// );
/// assert!(normalize_payee_id("no-at-sign").is_err());
/// ```
pub fn normalize_payee_id(raw: &str) -> Result<String, UriError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UriError::MissingField("payee_id"));
    }

    let normalized = trimmed.to_ascii_lowercase();
    let valid = normalized
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.is_empty()
                && local.chars().all(is_id_char)
                && domain.chars().all(is_id_char)
        });

    if valid {
        Ok(normalized)
    } else {
        Err(UriError::InvalidPayeeId(trimmed.to_string()))
    }
}

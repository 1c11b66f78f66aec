use uri::{normalize_payee_id, sanitize_name, PaymentFormInput, UriConfig};

/// Fills unusable required fields from `placeholder`.
///
/// The payee id is borrowed when it does not normalize, the name when it
/// sanitizes to nothing. Optional fields always come from `input`, unless
/// every field is blank, in which case the whole placeholder is used again.
/// Returns the merged input and whether anything was borrowed.
pub fn merge_with_placeholder(
    input: &PaymentFormInput,
    placeholder: &PaymentFormInput,
    cfg: &UriConfig,
) -> (PaymentFormInput, bool) {
    if input.is_blank() {
        return (placeholder.clone(), true);
    }

    let mut merged = input.clone();
    let mut borrowed = false;

    if normalize_payee_id(&input.payee_id).is_err() {
        merged.payee_id = placeholder.payee_id.clone();
        borrowed = true;
    }
    if sanitize_name(&input.payee_name, cfg.max_name_chars).is_empty() {
        merged.payee_name = placeholder.payee_name.clone();
        borrowed = true;
    }
    (merged, borrowed)
}

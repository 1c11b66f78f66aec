use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw, user-editable payment form.
///
/// Every field is kept exactly as typed; normalization happens only when a
/// URI is built, so the form can always be shown back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentFormInput {
    /// Payee identifier in `local@domain` form. Required.
    pub payee_id: String,
    /// Display name of the receiving party. Required.
    pub payee_name: String,
    /// Decimal amount; empty means "any amount".
    #[serde(default)]
    pub amount: String,
    /// Free-text transaction note.
    #[serde(default)]
    pub note: String,
}

/// Identifies one editable field of [`PaymentFormInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    PayeeId,
    PayeeName,
    Amount,
    Note,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::PayeeId,
        FormField::PayeeName,
        FormField::Amount,
        FormField::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::PayeeId => "payee_id",
            FormField::PayeeName => "payee_name",
            FormField::Amount => "amount",
            FormField::Note => "note",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PaymentFormInput {
    pub fn new(payee_id: impl Into<String>, payee_name: impl Into<String>) -> Self {
        Self {
            payee_id: payee_id.into(),
            payee_name: payee_name.into(),
            amount: String::new(),
            note: String::new(),
        }
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::PayeeId => &self.payee_id,
            FormField::PayeeName => &self.payee_name,
            FormField::Amount => &self.amount,
            FormField::Note => &self.note,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::PayeeId => self.payee_id = value,
            FormField::PayeeName => self.payee_name = value,
            FormField::Amount => self.amount = value,
            FormField::Note => self.note = value,
        }
    }

    /// True when every field is blank after trimming.
    pub fn is_blank(&self) -> bool {
        FormField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }
}

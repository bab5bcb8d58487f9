//! Validation of submitted transaction forms and the state of the editor panel.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use super::core::{TransactionId, TransactionRecord, TransactionType, canonical_date};

/// The largest amount accepted from a form.
///
/// Amounts are displayed to the cent, and above this the cents of an `f64` are
/// no longer exact.
pub const MAX_AMOUNT: f64 = 999_999_999_999.99;

/// A transaction form as submitted, before validation.
///
/// Every field is kept as the raw submitted text so that a rejected form can be
/// shown back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// The date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub amount: String,
    /// `income` or `expense`.
    #[serde(default)]
    pub transaction_type: String,
    /// Present (as `on`) only when the checkbox is ticked.
    pub recurring: Option<String>,
}

/// A transaction as sent to the JSON API, where the amount is a number and
/// `recurring` is a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub account: String,
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub recurring: bool,
}

impl From<TransactionPayload> for TransactionForm {
    fn from(payload: TransactionPayload) -> Self {
        Self {
            date: payload.date,
            description: payload.description,
            category: payload.category,
            account: payload.account,
            amount: payload.amount.to_string(),
            transaction_type: payload.transaction_type,
            recurring: payload.recurring.then(|| "on".to_owned()),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub date: Date,
    pub description: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub account: String,
    pub amount: f64,
    pub recurring: bool,
}

impl ValidatedTransaction {
    /// Attach `id` to make a storable record.
    pub fn into_record(self, id: TransactionId) -> TransactionRecord {
        TransactionRecord {
            id,
            date: self.date,
            description: self.description,
            transaction_type: self.transaction_type,
            category: self.category,
            account: self.account,
            amount: self.amount,
            recurring: self.recurring,
        }
    }
}

/// Per-field messages for a form that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub account: Option<String>,
    pub amount: Option<String>,
    pub transaction_type: Option<String>,
}

impl ValidationErrors {
    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages().next().is_none()
    }

    /// The messages in the order the fields appear in the editor.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        [
            &self.transaction_type,
            &self.amount,
            &self.date,
            &self.description,
            &self.category,
            &self.account,
        ]
        .into_iter()
        .filter_map(|message| message.as_deref())
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.messages().collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

impl TransactionForm {
    /// Check every field, collecting a message for each one that is invalid.
    ///
    /// # Errors
    /// Returns [ValidationErrors] if any field is missing or malformed.
    pub fn validate(&self) -> Result<ValidatedTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let date = match self.date.trim() {
            "" => {
                errors.date = Some("Date is required.".to_owned());
                None
            }
            text => Date::parse(text, canonical_date::FORMAT)
                .inspect_err(|_| {
                    errors.date = Some("Date must be in the form YYYY-MM-DD.".to_owned());
                })
                .ok(),
        };

        let description = required(&self.description, "Description", &mut errors.description);
        let category = required(&self.category, "Category", &mut errors.category);
        let account = required(&self.account, "Account", &mut errors.account);
        let amount = validate_amount(&self.amount, &mut errors.amount);

        let transaction_type = match self.transaction_type.trim() {
            "" => {
                errors.transaction_type = Some("Transaction type is required.".to_owned());
                None
            }
            text => text
                .parse::<TransactionType>()
                .inspect_err(|_| {
                    errors.transaction_type =
                        Some("Transaction type must be income or expense.".to_owned());
                })
                .ok(),
        };

        match (date, description, category, account, amount, transaction_type) {
            (
                Some(date),
                Some(description),
                Some(category),
                Some(account),
                Some(amount),
                Some(transaction_type),
            ) if errors.is_empty() => Ok(ValidatedTransaction {
                date,
                description,
                transaction_type,
                category,
                account,
                amount,
                recurring: self.recurring.is_some(),
            }),
            _ => Err(errors),
        }
    }
}

fn required(value: &str, name: &str, error: &mut Option<String>) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        *error = Some(format!("{name} is required."));
        None
    } else {
        Some(value.to_owned())
    }
}

fn validate_amount(text: &str, error: &mut Option<String>) -> Option<f64> {
    let text = text.trim();

    if text.is_empty() {
        *error = Some("Amount is required.".to_owned());
        return None;
    }

    let amount = match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            *error = Some("Amount must be a number.".to_owned());
            return None;
        }
    };

    if amount < 0.0 {
        *error = Some("Amount cannot be negative.".to_owned());
        return None;
    }

    if amount > MAX_AMOUNT {
        *error = Some("Amount is too large.".to_owned());
        return None;
    }

    let cents = amount * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        *error = Some("Amount can have at most two decimal places.".to_owned());
        return None;
    }

    Some(amount)
}

// ============================================================================
// EDITOR
// ============================================================================

/// Which record, if any, the editor panel is bound to.
///
/// There is only ever one editor, so at most one pending edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Adding,
    Editing(TransactionId),
}

impl EditorState {
    /// The heading of the editor panel.
    pub fn title(&self) -> String {
        match self {
            EditorState::Editing(id) => format!("Edit Transaction (ID: {id})"),
            _ => "Add New Transaction".to_owned(),
        }
    }

    /// The text of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self {
            EditorState::Editing(_) => "Save Changes",
            _ => "Save Transaction",
        }
    }
}

/// The values shown in the editor's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFields {
    pub date: String,
    pub description: String,
    pub category: String,
    pub account: String,
    pub amount: String,
    pub transaction_type: String,
    pub recurring: bool,
}

impl EditorFields {
    /// The defaults for a new transaction: today's date and income.
    pub fn for_add(today: Date) -> Self {
        Self {
            date: format_canonical(today),
            description: String::new(),
            category: String::new(),
            account: String::new(),
            amount: String::new(),
            transaction_type: TransactionType::Income.as_str().to_owned(),
            recurring: false,
        }
    }

    /// The values of an existing record.
    pub fn from_record(record: &TransactionRecord) -> Self {
        Self {
            date: format_canonical(record.date),
            description: record.description.clone(),
            category: record.category.clone(),
            account: record.account.clone(),
            amount: record.amount.to_string(),
            transaction_type: record.transaction_type.as_str().to_owned(),
            recurring: record.recurring,
        }
    }

    /// The values of a submitted form, used to show a rejected form again.
    pub fn from_form(form: &TransactionForm) -> Self {
        Self {
            date: form.date.clone(),
            description: form.description.clone(),
            category: form.category.clone(),
            account: form.account.clone(),
            amount: form.amount.clone(),
            transaction_type: form.transaction_type.clone(),
            recurring: form.recurring.is_some(),
        }
    }
}

fn format_canonical(date: Date) -> String {
    date.format(canonical_date::FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

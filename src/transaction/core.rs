//! Defines the core data model for ledger transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// ============================================================================
// MODELS
// ============================================================================

/// The unique identifier of a transaction in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create an ID from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned.
    Income,
    /// Money was spent.
    Expense,
}

impl TransactionType {
    /// The value used in forms, query strings and `data-type` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The sign displayed in front of an amount of this type.
    pub fn sign(self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string was not `income` or `expense`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
pub struct InvalidTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = InvalidTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(InvalidTransactionType(other.to_owned())),
        }
    }
}

/// An expense or income recorded in the ledger.
///
/// The amount is always a non-negative magnitude, the direction of the money
/// is given by [TransactionRecord::transaction_type].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// The ID of the transaction, unique within the ledger.
    pub id: TransactionId,
    /// When the transaction happened.
    #[serde(with = "canonical_date")]
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction was income or an expense.
    pub transaction_type: TransactionType,
    /// The category tag, e.g. "food".
    pub category: String,
    /// The ID of the account the money moved through.
    pub account: String,
    /// The magnitude of the transaction.
    pub amount: f64,
    /// Whether the transaction repeats.
    #[serde(default)]
    pub recurring: bool,
}

/// (De)serialises dates in the canonical `YYYY-MM-DD` form.
pub(crate) mod canonical_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    pub(crate) const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, FORMAT).map_err(D::Error::custom)
    }
}

// ============================================================================
// ID GENERATION
// ============================================================================

/// Issues transaction IDs derived from the current time in milliseconds.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last_issued: i128,
}

impl IdGenerator {
    /// Get a fresh ID for a transaction created at `now`.
    ///
    /// IDs are strictly increasing for one generator and never collide with an
    /// ID for which `is_taken` returns `true`.
    pub fn next_id(
        &mut self,
        now: OffsetDateTime,
        is_taken: impl Fn(&TransactionId) -> bool,
    ) -> TransactionId {
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let mut candidate = millis.max(self.last_issued + 1);

        while is_taken(&TransactionId::new(candidate.to_string())) {
            candidate += 1;
        }

        self.last_issued = candidate;
        TransactionId::new(candidate.to_string())
    }
}

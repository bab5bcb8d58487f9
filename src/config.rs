//! The configurable catalog of accounts and categories and how amounts are displayed.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

/// How digits are grouped when displaying amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Three digits, then groups of two, e.g. `12,34,567`.
    #[default]
    Indian,
    /// Groups of three, e.g. `1,234,567`.
    Western,
}

/// The currency symbol and digit grouping used to display amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// The symbol displayed between the sign and the digits.
    pub symbol: String,
    /// How to group the integer digits.
    #[serde(default)]
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_owned(),
            grouping: DigitGrouping::Indian,
        }
    }
}

/// An account that transactions can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOption {
    /// The value stored on transactions.
    pub id: String,
    /// The name shown to the user.
    pub name: String,
}

/// A category offered in the editor and filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// The value stored on transactions.
    pub value: String,
    /// The name shown to the user.
    pub label: String,
}

/// The options offered by the ledger's selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Accounts offered in the editor and the account filter.
    pub accounts: Vec<AccountOption>,
    /// Categories offered in the editor and the category filter.
    pub categories: Vec<CategoryOption>,
    /// How amounts are displayed.
    #[serde(default)]
    pub currency: CurrencyFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let accounts = [
            ("icici", "ICICI Savings"),
            ("hdfc", "HDFC Credit Card"),
            ("cash", "Cash Wallet"),
        ]
        .into_iter()
        .map(|(id, name)| AccountOption {
            id: id.to_owned(),
            name: name.to_owned(),
        })
        .collect();

        let categories = [
            ("salary", "Salary"),
            ("food", "Food & Dining"),
            ("shopping", "Shopping"),
            ("transport", "Transport"),
            ("utilities", "Utilities"),
            ("entertainment", "Entertainment"),
            ("health", "Health"),
            ("other", "Other"),
        ]
        .into_iter()
        .map(|(value, label)| CategoryOption {
            value: value.to_owned(),
            label: label.to_owned(),
        })
        .collect();

        Self {
            accounts,
            categories,
            currency: CurrencyFormat::default(),
        }
    }
}

impl LedgerConfig {
    /// Load the config from a JSON file.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::InvalidConfig(format!("could not read {path:?}: {error}")))?;

        serde_json::from_str(&text)
            .map_err(|error| Error::InvalidConfig(format!("could not parse {path:?}: {error}")))
    }

    /// The display name for the account `id`, or `id` itself if it is not a known account.
    pub fn account_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map_or(id, |account| account.name.as_str())
    }

    /// The label for the category `value`, or `value` itself if it is not a known category.
    pub fn category_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|category| category.value == value)
            .map_or(value, |category| category.label.as_str())
    }
}

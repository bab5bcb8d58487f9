//! The filter selectors on the transactions page and the predicate they build.

use serde::Deserialize;
use time::Date;

use crate::Error;

use super::{core::TransactionRecord, core::TransactionType, range::DateRangeFilter};

/// A selector value that is either the "all" sentinel or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    /// No restriction.
    #[default]
    All,
    /// Only values equal to this one pass.
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selection<T> {
    /// The selected value, or `None` for "all".
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

/// The four filter selectors, all ANDed together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    /// Income or expense.
    pub transaction_type: Selection<TransactionType>,
    /// The account ID.
    pub account: Selection<String>,
    /// The category tag.
    pub category: Selection<String>,
    /// The date bucket, evaluated against today.
    pub date_range: DateRangeFilter,
}

impl TransactionFilter {
    /// Whether `record` passes every active selector when the current date is `today`.
    pub fn matches(&self, record: &TransactionRecord, today: Date) -> bool {
        self.transaction_type.accepts(&record.transaction_type)
            && self.account.accepts(&record.account)
            && self.category.accepts(&record.category)
            && self.date_range.contains(record.date, today)
    }

    /// Whether every selector is set to "all".
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }
}

/// The query string sent by the filter selectors, e.g.
/// `?type=expense&account=all&category=food&range=this-month`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// `income`, `expense` or `all`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// An account ID or `all`.
    pub account: Option<String>,
    /// A category tag or `all`.
    pub category: Option<String>,
    /// A date-range query value.
    pub range: Option<String>,
}

impl TryFrom<FilterQuery> for TransactionFilter {
    type Error = Error;

    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        let transaction_type = match selected(query.transaction_type) {
            Some(text) => Selection::Only(
                text.parse::<TransactionType>()
                    .map_err(|error| Error::InvalidFilter(error.to_string()))?,
            ),
            None => Selection::All,
        };

        let date_range = match selected(query.range) {
            Some(text) => text
                .parse::<DateRangeFilter>()
                .map_err(|error| Error::InvalidFilter(error.to_string()))?,
            None => DateRangeFilter::All,
        };

        Ok(Self {
            transaction_type,
            account: selected(query.account).map_or(Selection::All, Selection::Only),
            category: selected(query.category).map_or(Selection::All, Selection::Only),
            date_range,
        })
    }
}

/// `None` for missing, empty or `all` selector values.
fn selected(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty() && value != "all")
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{
            core::{TransactionId, TransactionRecord, TransactionType},
            range::DateRangeFilter,
        },
    };

    use super::{FilterQuery, Selection, TransactionFilter};

    const TODAY: time::Date = date!(2025 - 06 - 15);

    fn groceries() -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new("1"),
            date: date!(2025 - 06 - 03),
            description: "Groceries".to_owned(),
            transaction_type: TransactionType::Expense,
            category: "food".to_owned(),
            account: "cash".to_owned(),
            amount: 400.0,
            recurring: false,
        }
    }

    fn expense_food_cash_this_month() -> TransactionFilter {
        TransactionFilter {
            transaction_type: Selection::Only(TransactionType::Expense),
            account: Selection::Only("cash".to_owned()),
            category: Selection::Only("food".to_owned()),
            date_range: DateRangeFilter::ThisMonth,
        }
    }

    #[test]
    fn default_filter_passes_everything() {
        let filter = TransactionFilter::default();

        assert!(filter.is_unrestricted());
        assert!(filter.matches(&groceries(), TODAY));
    }

    #[test]
    fn record_matching_every_selector_passes() {
        assert!(expense_food_cash_this_month().matches(&groceries(), TODAY));
    }

    #[test]
    fn failing_any_one_selector_hides_the_record() {
        let filter = expense_food_cash_this_month();
        let mut wrong_type = groceries();
        wrong_type.transaction_type = TransactionType::Income;
        let mut wrong_account = groceries();
        wrong_account.account = "icici".to_owned();
        let mut wrong_category = groceries();
        wrong_category.category = "shopping".to_owned();
        let mut wrong_date = groceries();
        wrong_date.date = date!(2025 - 05 - 31);

        for record in [wrong_type, wrong_account, wrong_category, wrong_date] {
            assert!(
                !filter.matches(&record, TODAY),
                "{record:?} matches three of four selectors and should be hidden"
            );
        }
    }

    #[test]
    fn query_with_all_values_is_unrestricted() {
        let query = FilterQuery {
            transaction_type: Some("all".to_owned()),
            account: Some("all".to_owned()),
            category: Some(String::new()),
            range: None,
        };

        let filter = TransactionFilter::try_from(query).unwrap();

        assert!(filter.is_unrestricted());
    }

    #[test]
    fn query_parses_each_selector() {
        let query: FilterQuery =
            serde_urlencoded::from_str("type=expense&account=cash&category=food&range=this-month")
                .unwrap();

        let filter = TransactionFilter::try_from(query).unwrap();

        assert_eq!(filter, expense_food_cash_this_month());
    }

    #[test]
    fn query_rejects_unknown_type_and_range() {
        let bad_type = FilterQuery {
            transaction_type: Some("transfer".to_owned()),
            ..Default::default()
        };
        let bad_range = FilterQuery {
            range: Some("next-week".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            TransactionFilter::try_from(bad_type),
            Err(Error::InvalidFilter(_))
        ));
        assert!(matches!(
            TransactionFilter::try_from(bad_range),
            Err(Error::InvalidFilter(_))
        ));
    }
}

//! Date ordering for the transactions table and the state of the sort button.

use super::core::TransactionRecord;

/// The order to sort transactions by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// The opposite order.
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// The icon and tooltip of the sort button, describing this order.
    pub fn affordance(self) -> SortAffordance {
        match self {
            Self::Ascending => SortAffordance {
                icon_class: "fas fa-sort-amount-up-alt",
                title: "Sort by Date (Oldest First)",
            },
            Self::Descending => SortAffordance {
                icon_class: "fas fa-sort-amount-down-alt",
                title: "Sort by Date (Newest First)",
            },
        }
    }
}

/// How the sort button presents the current order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortAffordance {
    /// The Font Awesome classes for the button icon.
    pub icon_class: &'static str,
    /// The button tooltip.
    pub title: &'static str,
}

/// Sort `records` by date in place.
///
/// The sort is stable: records sharing a date keep their relative order.
pub fn sort_records(records: &mut [TransactionRecord], order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => records.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::transaction::core::{TransactionId, TransactionRecord, TransactionType};

    use super::{SortOrder, sort_records};

    fn record(id: &str, date: Date) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(id),
            date,
            description: format!("transaction {id}"),
            transaction_type: TransactionType::Expense,
            category: "other".to_owned(),
            account: "cash".to_owned(),
            amount: 1.0,
            recurring: false,
        }
    }

    #[track_caller]
    fn assert_ids(records: &[TransactionRecord], want: &[&str]) {
        let got: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn descending_is_the_default() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
    }

    #[test]
    fn toggle_flips_order() {
        assert_eq!(SortOrder::Descending.toggle(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggle(), SortOrder::Descending);
    }

    #[test]
    fn affordance_describes_the_current_order() {
        let ascending = SortOrder::Ascending.affordance();
        let descending = SortOrder::Descending.affordance();

        assert_eq!(ascending.icon_class, "fas fa-sort-amount-up-alt");
        assert_eq!(ascending.title, "Sort by Date (Oldest First)");
        assert_eq!(descending.icon_class, "fas fa-sort-amount-down-alt");
        assert_eq!(descending.title, "Sort by Date (Newest First)");
    }

    #[test]
    fn sorts_by_date_in_both_directions() {
        let mut records = vec![
            record("2", date!(2025 - 05 - 20)),
            record("1", date!(2025 - 06 - 01)),
            record("3", date!(2024 - 12 - 31)),
        ];

        sort_records(&mut records, SortOrder::Descending);
        assert_ids(&records, &["1", "2", "3"]);

        sort_records(&mut records, SortOrder::Ascending);
        assert_ids(&records, &["3", "2", "1"]);
    }

    #[test]
    fn ties_keep_their_store_order() {
        let same_day = date!(2025 - 06 - 01);
        let mut records = vec![
            record("a", same_day),
            record("old", date!(2025 - 01 - 01)),
            record("b", same_day),
            record("c", same_day),
        ];

        sort_records(&mut records, SortOrder::Descending);
        assert_ids(&records, &["a", "b", "c", "old"]);

        sort_records(&mut records, SortOrder::Ascending);
        assert_ids(&records, &["old", "a", "b", "c"]);
    }
}

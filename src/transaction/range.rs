//! Date-range buckets for the transactions page.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// The date-range selector on the transactions page.
///
/// Buckets are evaluated against today's date, never the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangeFilter {
    /// Every date passes.
    #[default]
    All,
    /// On or after the first of the current month.
    ThisMonth,
    /// Anywhere in the previous calendar month.
    LastMonth,
    /// On or after the first of the month two months ago.
    #[serde(rename = "last-3-months")]
    LastThreeMonths,
    /// Custom bounds are not supported yet, so every date passes.
    Custom,
}

impl DateRangeFilter {
    /// All filters in the order they are offered in the selector.
    pub const ALL: [DateRangeFilter; 5] = [
        Self::All,
        Self::ThisMonth,
        Self::LastMonth,
        Self::LastThreeMonths,
        Self::Custom,
    ];

    /// The value used in query strings and `<option>` values.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::LastThreeMonths => "last-3-months",
            Self::Custom => "custom",
        }
    }

    /// The text shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
            Self::LastThreeMonths => "Last 3 Months",
            Self::Custom => "Custom Range",
        }
    }

    /// Whether `date` falls in this bucket when the current date is `today`.
    pub fn contains(self, date: Date, today: Date) -> bool {
        match self {
            Self::All | Self::Custom => true,
            Self::ThisMonth => date >= first_of_month_before(today, 0),
            Self::LastMonth => {
                let last_month = first_of_month_before(today, 1);
                let (start, end) = month_bounds(last_month.year(), last_month.month());

                start <= date && date <= end
            }
            Self::LastThreeMonths => date >= first_of_month_before(today, 2),
        }
    }
}

impl Display for DateRangeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// The string is not one of the date-range query values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a date range")]
pub struct InvalidDateRange(pub String);

impl FromStr for DateRangeFilter {
    type Err = InvalidDateRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_query_value() == s)
            .ok_or_else(|| InvalidDateRange(s.to_owned()))
    }
}

/// The first day of the month `months_back` months before the month of `date`.
///
/// Rolls back across year boundaries, e.g. two months before January 2025 is
/// November 2024.
pub fn first_of_month_before(date: Date, months_back: u8) -> Date {
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..months_back {
        if month == Month::January {
            year -= 1;
        }

        month = month.previous();
    }

    Date::from_calendar_date(year, month, 1).expect("invalid month start date")
}

/// The first and last day of `month` in `year`.
pub fn month_bounds(year: i32, month: Month) -> (Date, Date) {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    (start, end)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use super::{DateRangeFilter, first_of_month_before, month_bounds};

    const TODAY: time::Date = date!(2025 - 06 - 15);

    #[test]
    fn this_month_starts_on_the_first() {
        assert!(DateRangeFilter::ThisMonth.contains(date!(2025 - 06 - 01), TODAY));
        assert!(!DateRangeFilter::ThisMonth.contains(date!(2025 - 05 - 31), TODAY));
    }

    #[test]
    fn last_month_is_the_closed_previous_month() {
        assert!(DateRangeFilter::LastMonth.contains(date!(2025 - 05 - 01), TODAY));
        assert!(DateRangeFilter::LastMonth.contains(date!(2025 - 05 - 31), TODAY));
        assert!(!DateRangeFilter::LastMonth.contains(date!(2025 - 06 - 01), TODAY));
        assert!(!DateRangeFilter::LastMonth.contains(date!(2025 - 04 - 30), TODAY));
    }

    #[test]
    fn last_three_months_starts_two_months_back() {
        assert!(DateRangeFilter::LastThreeMonths.contains(date!(2025 - 04 - 01), TODAY));
        assert!(DateRangeFilter::LastThreeMonths.contains(date!(2025 - 06 - 10), TODAY));
        assert!(!DateRangeFilter::LastThreeMonths.contains(date!(2025 - 03 - 31), TODAY));
    }

    #[test]
    fn open_buckets_pass_everything() {
        for date in [date!(1999 - 01 - 01), date!(2030 - 12 - 31)] {
            assert!(DateRangeFilter::All.contains(date, TODAY));
            assert!(DateRangeFilter::Custom.contains(date, TODAY));
        }
    }

    #[test]
    fn month_arithmetic_rolls_over_years() {
        assert_eq!(
            first_of_month_before(date!(2025 - 01 - 20), 1),
            date!(2024 - 12 - 01)
        );
        assert_eq!(
            first_of_month_before(date!(2025 - 02 - 28), 2),
            date!(2024 - 12 - 01)
        );
        assert!(DateRangeFilter::LastMonth.contains(date!(2024 - 12 - 31), date!(2025 - 01 - 05)));
    }

    #[test]
    fn month_bounds_handle_leap_years() {
        assert_eq!(
            month_bounds(2024, Month::February),
            (date!(2024 - 02 - 01), date!(2024 - 02 - 29))
        );
        assert_eq!(
            month_bounds(2025, Month::February),
            (date!(2025 - 02 - 01), date!(2025 - 02 - 28))
        );
    }

    #[test]
    fn query_values_round_trip() {
        for filter in DateRangeFilter::ALL {
            assert_eq!(filter.as_query_value().parse(), Ok(filter));
        }

        assert!("next-week".parse::<DateRangeFilter>().is_err());
    }
}

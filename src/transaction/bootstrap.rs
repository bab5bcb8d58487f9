//! Reads transaction records back out of pre-rendered table markup.
//!
//! This is a compatibility path for starting the ledger from a static page
//! instead of a list of records. Rows must be inside a `<table>` element, since
//! HTML parsers drop table rows found anywhere else.

use std::{collections::HashSet, sync::OnceLock};

use scraper::{ElementRef, Html, Selector};

use super::{
    core::{TransactionId, TransactionRecord, TransactionType},
    format::{parse_amount, parse_display_date},
};

/// Why a value or a pre-rendered row could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The row is missing a cell or attribute.
    #[error("the row has no {0}")]
    MissingField(&'static str),

    /// The date is in neither the display nor the canonical form.
    #[error("could not parse the date \"{0}\"")]
    InvalidDate(String),

    /// The amount text does not contain a number.
    #[error("could not parse the amount \"{0}\"")]
    InvalidAmount(String),

    /// The `data-type` attribute is not `income` or `expense`.
    #[error("\"{0}\" is not a transaction type")]
    InvalidType(String),

    /// The sign of the amount contradicts the `data-type` attribute.
    #[error("the amount is signed as {sign:?} but the row is marked as {marked}")]
    SignMismatch {
        /// The type implied by the amount's sign.
        sign: TransactionType,
        /// The type given by `data-type`.
        marked: TransactionType,
    },

    /// An earlier row already used this ID.
    #[error("the ID {0} is used by an earlier row")]
    DuplicateId(TransactionId),
}

/// A row that was left out of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// The zero-based position of the row in the markup.
    pub index: usize,
    /// Why it was skipped.
    pub error: ParseError,
}

/// The outcome of reading pre-rendered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapReport {
    /// The records read from well-formed rows, in document order.
    pub records: Vec<TransactionRecord>,
    /// The malformed or duplicate rows that were left out.
    pub skipped: Vec<SkippedRow>,
}

struct RowSelectors {
    row: Selector,
    cell: Selector,
    edit_button: Selector,
    recurring_icon: Selector,
    amount: Selector,
}

fn selectors() -> &'static RowSelectors {
    static SELECTORS: OnceLock<RowSelectors> = OnceLock::new();

    SELECTORS.get_or_init(|| RowSelectors {
        row: Selector::parse("tr.transaction-row").unwrap(),
        cell: Selector::parse("td").unwrap(),
        edit_button: Selector::parse(".edit-btn[data-id]").unwrap(),
        recurring_icon: Selector::parse(".recurring-icon").unwrap(),
        amount: Selector::parse(".amount-income, .amount-expense").unwrap(),
    })
}

/// Read every `tr.transaction-row` in `markup` into a record.
///
/// Malformed rows and rows repeating an earlier ID are skipped with a warning
/// rather than aborting, so a single bad row never hides the rest.
pub fn parse_rows(markup: &str) -> BootstrapReport {
    let document = Html::parse_document(markup);
    let mut seen = HashSet::new();
    let mut report = BootstrapReport::default();

    for (index, row) in document.select(&selectors().row).enumerate() {
        let result = parse_row(row).and_then(|record| {
            if seen.insert(record.id.clone()) {
                Ok(record)
            } else {
                Err(ParseError::DuplicateId(record.id))
            }
        });

        match result {
            Ok(record) => report.records.push(record),
            Err(error) => {
                tracing::warn!("Skipping pre-rendered transaction row {index}: {error}");
                report.skipped.push(SkippedRow { index, error });
            }
        }
    }

    tracing::debug!(
        "Read {} transactions from markup, skipped {}",
        report.records.len(),
        report.skipped.len()
    );

    report
}

fn parse_row(row: ElementRef<'_>) -> Result<TransactionRecord, ParseError> {
    let selectors = selectors();

    let id = row
        .select(&selectors.edit_button)
        .next()
        .and_then(|button| button.value().attr("data-id"))
        .or_else(|| row.value().attr("data-id"))
        .filter(|id| !id.trim().is_empty())
        .ok_or(ParseError::MissingField("ID"))?;

    let marked_type = row
        .value()
        .attr("data-type")
        .ok_or(ParseError::MissingField("type"))?;
    let transaction_type = marked_type
        .parse::<TransactionType>()
        .map_err(|_| ParseError::InvalidType(marked_type.to_owned()))?;

    let category = row
        .value()
        .attr("data-category")
        .ok_or(ParseError::MissingField("category"))?;
    let account = row
        .value()
        .attr("data-account")
        .ok_or(ParseError::MissingField("account"))?;

    let mut cells = row.select(&selectors.cell);
    let date_text = cells
        .next()
        .map(element_text)
        .ok_or(ParseError::MissingField("date"))?;
    let description = cells
        .next()
        .map(description_text)
        .ok_or(ParseError::MissingField("description"))?;

    let date = parse_display_date(&date_text)?;

    let amount_text = row
        .select(&selectors.amount)
        .next()
        .map(element_text)
        .ok_or(ParseError::MissingField("amount"))?;
    let (amount, sign) = parse_amount(&amount_text)?;

    match sign {
        Some(sign) if sign != transaction_type => {
            return Err(ParseError::SignMismatch {
                sign,
                marked: transaction_type,
            });
        }
        _ => {}
    }

    Ok(TransactionRecord {
        id: TransactionId::new(id.trim()),
        date,
        description,
        transaction_type,
        category: category.to_owned(),
        account: account.to_owned(),
        amount,
        recurring: row.select(&selectors.recurring_icon).next().is_some(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// The text of the description cell without the recurring indicator.
///
/// Text inside `.recurring-icon` is left out. Markup that has the bare `⟲`
/// glyph instead of the icon element loses one trailing glyph.
fn description_text(cell: ElementRef<'_>) -> String {
    let has_icon = cell.select(&selectors().recurring_icon).next().is_some();
    let text = cell
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|element| element.id() != cell.id())
                .any(|element| element.value().classes().any(|class| class == "recurring-icon"))
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect::<String>();
    let text = text.trim();

    if has_icon {
        return text.to_owned();
    }

    text.strip_suffix('⟲').unwrap_or(text).trim_end().to_owned()
}

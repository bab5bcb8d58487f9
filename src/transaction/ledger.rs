//! The ledger controller: the store of transaction records and the filter,
//! sort and editor state of the transactions page.
//!
//! Every mutation re-runs the sort-then-filter pipeline before returning, so a
//! caller always renders a view that reflects the store after the change.
//! The controller never reads the clock; callers pass in the current local
//! date-time.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::Error;

use super::{
    bootstrap::{BootstrapReport, parse_rows},
    core::{IdGenerator, TransactionId, TransactionRecord},
    filter::TransactionFilter,
    form::{EditorFields, EditorState, TransactionForm, ValidationErrors},
    sort::{SortOrder, sort_records},
};

/// One record in the order it is displayed and whether it passes the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    /// The stored record.
    pub record: TransactionRecord,
    /// Rows that fail the filter are rendered hidden rather than left out.
    pub visible: bool,
}

/// The result of running the sort-then-filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    /// Every record, in display order.
    pub rows: Vec<LedgerRow>,
    /// The number of rows that pass the filter.
    pub visible_count: usize,
    /// The number of records in the store.
    pub total_count: usize,
    /// The order the rows are sorted in.
    pub sort_order: SortOrder,
}

impl LedgerView {
    /// The count line shown under the table.
    ///
    /// Both numbers are the visible count; the store total is exposed
    /// separately through [LedgerView::total_count].
    pub fn summary(&self) -> String {
        format!(
            "Showing 1 to {0} of {0} transactions",
            self.visible_count
        )
    }

    /// The IDs of the visible rows in display order.
    pub fn visible_ids(&self) -> Vec<&TransactionId> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| &row.record.id)
            .collect()
    }
}

/// What an editor submission did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A new record was appended with a fresh ID.
    Added(TransactionRecord),
    /// The record being edited was replaced.
    Updated(TransactionRecord),
    /// The record being edited was deleted before the edit was submitted, so
    /// the edit was dropped.
    Dropped(TransactionId),
}

/// What a delete request did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion {
    /// No record has the ID, nothing changed.
    Missing(TransactionId),
    /// The user declined the confirmation, nothing changed.
    Cancelled,
    /// The record was removed.
    Deleted(TransactionRecord),
}

/// Owns the transaction records and the state of the transactions page.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
    sort_order: SortOrder,
    filter: TransactionFilter,
    editor: EditorState,
    id_generator: IdGenerator,
}

impl Ledger {
    /// Create an empty ledger, newest first with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // SEEDING
    // ========================================================================

    /// Replace the store with `records`.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTransactionId] if two records share an ID, in
    /// which case the store is left unchanged.
    pub fn seed(&mut self, records: Vec<TransactionRecord>) -> Result<(), Error> {
        let mut seen = HashSet::new();

        for record in &records {
            if !seen.insert(&record.id) {
                return Err(Error::DuplicateTransactionId(record.id.clone()));
            }
        }

        tracing::info!("Seeded the ledger with {} transactions", records.len());
        self.records = records;

        Ok(())
    }

    /// Replace the store with the records read from pre-rendered table markup.
    ///
    /// Malformed rows are skipped and listed in the returned report.
    pub fn bootstrap(&mut self, markup: &str) -> BootstrapReport {
        let report = parse_rows(markup);

        tracing::info!(
            "Bootstrapped the ledger with {} transactions ({} rows skipped)",
            report.records.len(),
            report.skipped.len()
        );
        self.records = report.records.clone();

        report
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The records in store order, which is the order of the last sort.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The record with `id`, if there is one.
    pub fn get(&self, id: &TransactionId) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// The number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The order the rows are sorted in.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The active filter.
    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    /// Whether the editor is closed, adding or editing.
    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    // ========================================================================
    // FILTER/SORT PIPELINE
    // ========================================================================

    /// Sort the store, then evaluate the filter against today's date.
    pub fn view(&mut self, now: OffsetDateTime) -> LedgerView {
        sort_records(&mut self.records, self.sort_order);

        let today = now.date();
        let rows: Vec<LedgerRow> = self
            .records
            .iter()
            .map(|record| LedgerRow {
                visible: self.filter.matches(record, today),
                record: record.clone(),
            })
            .collect();
        let visible_count = rows.iter().filter(|row| row.visible).count();

        tracing::debug!(
            "Ledger pipeline: {visible_count} of {} transactions visible, {:?} with {:?}",
            rows.len(),
            self.sort_order,
            self.filter
        );

        LedgerView {
            total_count: rows.len(),
            visible_count,
            rows,
            sort_order: self.sort_order,
        }
    }

    /// Re-apply the current sort and filter.
    pub fn refresh(&mut self, now: OffsetDateTime) -> LedgerView {
        tracing::debug!("Refreshing transaction list");
        self.view(now)
    }

    /// Replace the filter and re-run the pipeline.
    pub fn set_filter(&mut self, filter: TransactionFilter, now: OffsetDateTime) -> LedgerView {
        self.filter = filter;
        self.view(now)
    }

    /// Flip the sort order and re-run the pipeline.
    pub fn toggle_sort(&mut self, now: OffsetDateTime) -> LedgerView {
        self.sort_order = self.sort_order.toggle();
        self.view(now)
    }

    /// Clear the filters, sort newest first and close the editor, as on a fresh
    /// page load.
    pub fn reset_view(&mut self) {
        self.filter = TransactionFilter::default();
        self.sort_order = SortOrder::default();
        self.editor = EditorState::Closed;
    }

    // ========================================================================
    // EDITOR
    // ========================================================================

    /// Open the editor for a new transaction.
    pub fn open_add_editor(&mut self, now: OffsetDateTime) -> EditorFields {
        self.editor = EditorState::Adding;
        EditorFields::for_add(now.date())
    }

    /// Open the editor bound to the record `id`.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if there is no such record, in
    /// which case the editor state is unchanged.
    pub fn open_edit_editor(&mut self, id: &TransactionId) -> Result<EditorFields, Error> {
        let fields = match self.get(id) {
            Some(record) => EditorFields::from_record(record),
            None => {
                tracing::warn!("Cannot edit transaction {id}: it is not in the ledger");
                return Err(Error::TransactionNotFound(id.clone()));
            }
        };

        self.editor = EditorState::Editing(id.clone());

        Ok(fields)
    }

    /// Close the editor without changing the store.
    pub fn cancel_editor(&mut self) {
        self.editor = EditorState::Closed;
    }

    /// Submit the editor: add a new record, or replace the record being edited.
    ///
    /// A submission while the editor is closed is treated as an add.
    ///
    /// # Errors
    /// Returns the per-field messages if the form is invalid. The store and
    /// editor state are left unchanged.
    pub fn submit(
        &mut self,
        form: &TransactionForm,
        now: OffsetDateTime,
    ) -> Result<(Submission, LedgerView), ValidationErrors> {
        let validated = form.validate()?;

        let submission = match std::mem::take(&mut self.editor) {
            EditorState::Editing(id) => match self.position(&id) {
                Some(index) => {
                    let record = validated.into_record(id);
                    self.records[index] = record.clone();
                    tracing::info!("Updated transaction {}", record.id);
                    Submission::Updated(record)
                }
                None => {
                    tracing::warn!(
                        "Dropping update to transaction {id}: it is no longer in the ledger"
                    );
                    Submission::Dropped(id)
                }
            },
            EditorState::Adding | EditorState::Closed => {
                let id = self.next_id(now);
                let record = validated.into_record(id);
                self.records.push(record.clone());
                tracing::info!("Added transaction {}", record.id);
                Submission::Added(record)
            }
        };

        Ok((submission, self.view(now)))
    }

    /// Delete the record `id` if `confirmed` is true.
    ///
    /// Deleting a missing ID is a logged no-op. A confirmed delete also closes
    /// the editor.
    pub fn delete(
        &mut self,
        id: &TransactionId,
        confirmed: bool,
        now: OffsetDateTime,
    ) -> (Deletion, LedgerView) {
        let deletion = match self.position(id) {
            None => {
                tracing::warn!("Cannot delete transaction {id}: it is not in the ledger");
                Deletion::Missing(id.clone())
            }
            Some(_) if !confirmed => {
                tracing::debug!("Deletion of transaction {id} was not confirmed");
                Deletion::Cancelled
            }
            Some(index) => {
                let record = self.records.remove(index);
                self.editor = EditorState::Closed;
                tracing::info!("Deleted transaction {id}");
                Deletion::Deleted(record)
            }
        };

        (deletion, self.view(now))
    }

    // ========================================================================
    // JSON API
    // ========================================================================

    /// Validate `form` and append it as a new record.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the form is invalid.
    pub fn create(
        &mut self,
        form: &TransactionForm,
        now: OffsetDateTime,
    ) -> Result<TransactionRecord, Error> {
        let validated = form.validate().map_err(Error::InvalidTransaction)?;
        let record = validated.into_record(self.next_id(now));

        self.records.push(record.clone());
        tracing::info!("Created transaction {}", record.id);
        self.view(now);

        Ok(record)
    }

    /// Validate `form` and replace the record `id` with it.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if there is no such record, or
    /// [Error::InvalidTransaction] if the form is invalid.
    pub fn update(
        &mut self,
        id: &TransactionId,
        form: &TransactionForm,
        now: OffsetDateTime,
    ) -> Result<TransactionRecord, Error> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::TransactionNotFound(id.clone()))?;
        let validated = form.validate().map_err(Error::InvalidTransaction)?;
        let record = validated.into_record(id.clone());

        self.records[index] = record.clone();
        tracing::info!("Updated transaction {id}");
        self.view(now);

        Ok(record)
    }

    /// Remove the record `id`.
    ///
    /// The editor is left as is, so an open edit of `id` is dropped when it is
    /// submitted.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if there is no such record.
    pub fn remove(
        &mut self,
        id: &TransactionId,
        now: OffsetDateTime,
    ) -> Result<TransactionRecord, Error> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::TransactionNotFound(id.clone()))?;
        let record = self.records.remove(index);
        tracing::info!("Removed transaction {id}");
        self.view(now);

        Ok(record)
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.records.iter().position(|record| record.id == *id)
    }

    fn next_id(&mut self, now: OffsetDateTime) -> TransactionId {
        let records = &self.records;
        self.id_generator
            .next_id(now, |id| records.iter().any(|record| record.id == *id))
    }
}

//! HTML rendering for the transactions page.
//!
//! The page has two swap targets that stay in place for the lifetime of the
//! page: `#transaction-table` and `#editor-container`. Handlers re-render the
//! contents of these elements, never the elements themselves.

use maud::{Markup, html};

use crate::{
    config::LedgerConfig,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, BUTTON_EDIT_STYLE, BUTTON_PRIMARY_STYLE,
        BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
};

use super::{
    core::{TransactionRecord, TransactionType},
    filter::TransactionFilter,
    form::{EditorFields, EditorState, ValidationErrors},
    format::{format_amount, format_display_date},
    ledger::LedgerView,
    range::DateRangeFilter,
};

pub(crate) const TABLE_TARGET: &str = "#transaction-table";
pub(crate) const EDITOR_TARGET: &str = "#editor-container";
pub(crate) const ALERT_TARGET: &str = "#alert-container";

fn type_label(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "Income",
        TransactionType::Expense => "Expense",
    }
}

fn badge_style(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => {
            "text-green-800 bg-green-100 dark:bg-green-900 dark:text-green-300"
        }
        TransactionType::Expense => "text-red-800 bg-red-100 dark:bg-red-900 dark:text-red-300",
    }
}

/// The full transactions page with the editor closed.
pub(crate) fn transactions_page_view(
    view: &LedgerView,
    filter: &TransactionFilter,
    config: &LedgerConfig,
) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end gap-2"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    div class="flex gap-2"
                    {
                        button
                            type="button"
                            id="add-transaction"
                            hx-get=(endpoints::NEW_TRANSACTION_EDITOR)
                            hx-target=(EDITOR_TARGET)
                            hx-target-error=(ALERT_TARGET)
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            i class="fas fa-plus" {}
                            " Add Transaction"
                        }

                        button
                            type="button"
                            id="refresh-transactions"
                            title="Refresh"
                            hx-post=(endpoints::REFRESH_TRANSACTIONS)
                            hx-target=(TABLE_TARGET)
                            hx-target-error=(ALERT_TARGET)
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            i class="fas fa-sync-alt" {}
                        }
                    }
                }

                (filter_controls_view(filter, config))

                div id="editor-container" {}

                div id="transaction-table"
                {
                    (transaction_table_view(view, config))
                }
            }
        }
    };

    base("Transactions", &content)
}

/// The four filter selectors, pre-selected from `filter`.
pub(crate) fn filter_controls_view(filter: &TransactionFilter, config: &LedgerConfig) -> Markup {
    let selected_type = filter.transaction_type.as_option().copied();
    let selected_account = filter.account.as_option().map(String::as_str);
    let selected_category = filter.category.as_option().map(String::as_str);

    html! {
        form
            id="filters"
            hx-get=(endpoints::TRANSACTIONS_TABLE)
            hx-trigger="change"
            hx-target=(TABLE_TARGET)
            hx-target-error=(ALERT_TARGET)
            class="grid grid-cols-2 lg:grid-cols-4 gap-4"
        {
            div
            {
                label for="filter-type" class=(FORM_LABEL_STYLE) { "Type" }
                select id="filter-type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[selected_type.is_none()] { "All Types" }
                    @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                        option
                            value=(transaction_type)
                            selected[selected_type == Some(transaction_type)]
                        {
                            (type_label(transaction_type))
                        }
                    }
                }
            }

            div
            {
                label for="filter-account" class=(FORM_LABEL_STYLE) { "Account" }
                select id="filter-account" name="account" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[selected_account.is_none()] { "All Accounts" }
                    @for account in &config.accounts {
                        option
                            value=(account.id)
                            selected[selected_account == Some(account.id.as_str())]
                        {
                            (account.name)
                        }
                    }
                }
            }

            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }
                select id="filter-category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[selected_category.is_none()] { "All Categories" }
                    @for category in &config.categories {
                        option
                            value=(category.value)
                            selected[selected_category == Some(category.value.as_str())]
                        {
                            (category.label)
                        }
                    }
                }
            }

            div
            {
                label for="filter-range" class=(FORM_LABEL_STYLE) { "Date Range" }
                select id="filter-range" name="range" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for range in DateRangeFilter::ALL {
                        option
                            value=(range.as_query_value())
                            selected[filter.date_range == range]
                        {
                            (range.label())
                        }
                    }
                }
            }
        }
    }
}

/// The contents of `#transaction-table`: count, sort button and every row.
pub(crate) fn transaction_table_view(view: &LedgerView, config: &LedgerConfig) -> Markup {
    let sort = view.sort_order.affordance();

    html! {
        div class="flex justify-between items-center my-2"
        {
            p id="transactionCount" data-total=(view.total_count) class="text-sm"
            {
                (view.summary())
            }

            button
                type="button"
                id="sort-button"
                title=(sort.title)
                hx-post=(endpoints::SORT_TRANSACTIONS)
                hx-target=(TABLE_TARGET)
                hx-target-error=(ALERT_TARGET)
                class=(BUTTON_SECONDARY_STYLE)
            {
                i class=(sort.icon_class) {}
                " Date"
            }
        }

        table
            id="transactions"
            class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class="px-6 py-3" { "Date" }
                    th scope="col" class="px-6 py-3" { "Description" }
                    th scope="col" class="px-6 py-3" { "Type" }
                    th scope="col" class="px-6 py-3" { "Category" }
                    th scope="col" class="px-6 py-3" { "Account" }
                    th scope="col" class="px-6 py-3 text-right" { "Amount" }
                    th scope="col" class="px-6 py-3" { "Actions" }
                }
            }

            tbody
            {
                @for row in &view.rows {
                    (transaction_row_view(&row.record, row.visible, config))
                }
            }
        }

        @if view.visible_count == 0 {
            p id="empty-state" class="py-4 text-center"
            {
                "No transactions match the selected filters."
            }
        }
    }
}

/// One table row. Rows that fail the filter are rendered with `hidden`.
pub(crate) fn transaction_row_view(
    record: &TransactionRecord,
    visible: bool,
    config: &LedgerConfig,
) -> Markup {
    let transaction_type = record.transaction_type;
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_EDITOR, record.id.as_str());
    let delete_url = format!(
        "{}?confirm=true",
        format_endpoint(endpoints::DELETE_TRANSACTION, record.id.as_str())
    );
    let confirm_message = format!(
        "Are you sure you want to permanently delete transaction ID: {}?",
        record.id
    );

    html! {
        tr
            class={ "transaction-row " (transaction_type) "-row " (TABLE_ROW_STYLE) }
            data-id=(record.id)
            data-type=(transaction_type)
            data-category=(record.category)
            data-account=(record.account)
            hidden[!visible]
        {
            td class=(TABLE_CELL_STYLE) { (format_display_date(record.date)) }

            td class=(TABLE_CELL_STYLE)
            {
                (record.description)

                @if record.recurring {
                    " "
                    i class="fas fa-redo recurring-icon" title="Recurring" { "⟲" }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class={ "badge " (transaction_type) "-badge " (BADGE_STYLE) " " (badge_style(transaction_type)) }
                {
                    (type_label(transaction_type))
                }
            }

            td class=(TABLE_CELL_STYLE) { (config.category_label(&record.category)) }

            td class=(TABLE_CELL_STYLE) { (config.account_name(&record.account)) }

            td class={ (TABLE_CELL_STYLE) " text-right amount-" (transaction_type) }
            {
                (format_amount(record.amount, transaction_type, &config.currency))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    button
                        type="button"
                        class={ "action-btn edit-btn " (BUTTON_EDIT_STYLE) }
                        data-id=(record.id)
                        hx-get=(edit_url)
                        hx-target=(EDITOR_TARGET)
                        hx-target-error=(ALERT_TARGET)
                    {
                        "Edit"
                    }

                    button
                        type="button"
                        class={ "action-btn delete-btn " (BUTTON_DELETE_STYLE) }
                        data-id=(record.id)
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target=(TABLE_TARGET)
                        hx-target-error=(ALERT_TARGET)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// The contents of `#editor-container` while the editor is open.
pub(crate) fn editor_view(
    state: &EditorState,
    fields: &EditorFields,
    errors: Option<&ValidationErrors>,
    config: &LedgerConfig,
) -> Markup {
    let date_error = errors.and_then(|errors| errors.date.as_deref());
    let description_error = errors.and_then(|errors| errors.description.as_deref());
    let category_error = errors.and_then(|errors| errors.category.as_deref());
    let account_error = errors.and_then(|errors| errors.account.as_deref());
    let amount_error = errors.and_then(|errors| errors.amount.as_deref());
    let type_error = errors.and_then(|errors| errors.transaction_type.as_deref());

    html! {
        section
            id="transaction-editor"
            class="rounded bg-white dark:bg-gray-800 p-4 space-y-4"
        {
            h2 id="editor-title" class="text-lg font-bold" { (state.title()) }

            form
                id="transaction-form"
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target=(TABLE_TARGET)
                hx-target-422=(EDITOR_TARGET)
                hx-target-error=(ALERT_TARGET)
                class="grid grid-cols-1 lg:grid-cols-2 gap-4"
            {
                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        type="date"
                        id="date"
                        name="date"
                        required
                        value=(fields.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("date", date_error))
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        type="text"
                        id="description"
                        name="description"
                        placeholder="Description"
                        required
                        value=(fields.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("description", description_error))
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[fields.category.is_empty()] { "Select a category" }
                        @for category in &config.categories {
                            option
                                value=(category.value)
                                selected[fields.category == category.value]
                            {
                                (category.label)
                            }
                        }
                    }
                    (field_error("category", category_error))
                }

                div
                {
                    label for="account" class=(FORM_LABEL_STYLE) { "Account" }
                    select id="account" name="account" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[fields.account.is_empty()] { "Select an account" }
                        @for account in &config.accounts {
                            option
                                value=(account.id)
                                selected[fields.account == account.id]
                            {
                                (account.name)
                            }
                        }
                    }
                    (field_error("account", account_error))
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        type="number"
                        id="amount"
                        name="amount"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        value=(fields.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("amount", amount_error))
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }
                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                            label class="flex items-center gap-2"
                            {
                                input
                                    type="radio"
                                    id={ "type-" (transaction_type) }
                                    name="transactionType"
                                    value=(transaction_type)
                                    checked[fields.transaction_type == transaction_type.as_str()]
                                    class=(FORM_RADIO_INPUT_STYLE);
                                (type_label(transaction_type))
                            }
                        }
                    }
                    (field_error("transactionType", type_error))
                }

                label class="flex items-center gap-2"
                {
                    input
                        type="checkbox"
                        id="recurring"
                        name="recurring"
                        checked[fields.recurring];
                    "Recurring"
                }

                div class="flex gap-2 lg:col-span-2"
                {
                    button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        (state.submit_label())
                    }

                    button
                        type="button"
                        id="cancel-button"
                        hx-post=(endpoints::CANCEL_EDITOR)
                        hx-target=(EDITOR_TARGET)
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Cancel"
                    }
                }
            }
        }
    }
}

fn field_error(field: &str, message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p id={ (field) "-error" } class={ "field-error " (FORM_ERROR_STYLE) } { (message) }
        }
    }
}

/// An empty editor container swapped in out-of-band, closing the editor.
pub(crate) fn closed_editor_oob() -> Markup {
    html! {
        div id="editor-container" hx-swap-oob="true" {}
    }
}

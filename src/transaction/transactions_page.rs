//! Defines the route handler for the page that adds and lists transactions.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    category::category_select,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, dollar_input_styles, format_currency, loading_spinner,
    },
    ledger::BudgetTracker,
    navigation::NavBar,
    timezone::today_in,
    transaction::{Transaction, TransactionType},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The budget tracker holding the transactions to list.
    budget_tracker: Arc<Mutex<BudgetTracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding a transaction and the list of all transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;

    let budget_tracker = state
        .budget_tracker
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    Ok(transactions_view(today, &budget_tracker.ledger().transactions).into_response())
}

fn transactions_view(today: Date, transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                div class=(FORM_CONTAINER_STYLE)
                {
                    (transaction_form(today))
                }

                section class="relative overflow-x-auto shadow-md rounded-lg"
                {
                    @if transactions.is_empty() {
                        p class="p-6 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No transactions yet. Add your first transaction above."
                        }
                    } @else {
                        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                                }
                            }

                            tbody
                            {
                                @for transaction in transactions {
                                    (transaction_row(transaction))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn transaction_form(today: Date) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Add Transaction" }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for kind in [TransactionType::Expense, TransactionType::Income] {
                        @let id = format!("type-{}", kind.as_str());

                        div class="flex-1"
                        {
                            input
                                type="radio"
                                id=(id)
                                name="type"
                                value=(kind.as_str())
                                checked[kind == TransactionType::Expense]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (kind.label()) }
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (category_select())

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (spinner) }
                " Add Transaction"
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionType::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionType::Expense => ("-", "text-red-600 dark:text-red-400"),
    };
    let delete_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class=(TABLE_CELL_STYLE)
            {
                @if transaction.description.is_empty() {
                    span class="text-gray-400" { "No description" }
                } @else {
                    (transaction.description)
                }
            }
            td class=(TABLE_CELL_STYLE) { span class=(CATEGORY_BADGE_STYLE) { (transaction.category) } }
            td class={ (TABLE_CELL_STYLE) " font-semibold " (amount_style) }
            {
                (sign) (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

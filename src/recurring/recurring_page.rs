//! Defines the route handler for the page that adds and lists recurring transactions.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::projected_monthly_recurring_cost,
    category::category_select,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_TOGGLE_STYLE, CARD_STYLE,
        CATEGORY_BADGE_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, loading_spinner,
    },
    ledger::BudgetTracker,
    navigation::NavBar,
    recurring::{Frequency, RecurringTransaction},
    timezone::today_in,
    transaction::TransactionType,
};

/// The state needed for the recurring transactions page.
#[derive(Debug, Clone)]
pub struct RecurringViewState {
    budget_tracker: Arc<Mutex<BudgetTracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for RecurringViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form for adding a recurring transaction and the list of all
/// recurring transactions.
pub async fn get_recurring_page(
    State(state): State<RecurringViewState>,
) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;

    let budget_tracker = state
        .budget_tracker
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    Ok(recurring_view(today, &budget_tracker.ledger().recurring_transactions).into_response())
}

fn recurring_view(today: Date, recurring_transactions: &[RecurringTransaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECURRING_VIEW).into_html();
    let projected_net = projected_monthly_recurring_cost(recurring_transactions);
    let projected_style = if projected_net < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                div class=(FORM_CONTAINER_STYLE)
                {
                    (recurring_form(today))
                }

                div class=(CARD_STYLE)
                {
                    h3 class="text-sm font-medium text-gray-600 dark:text-gray-400"
                    {
                        "Projected Monthly Net"
                    }
                    p id="projected-net" class={ "text-2xl font-bold " (projected_style) }
                    {
                        (format_currency(projected_net))
                    }
                    p class="text-xs text-gray-500 dark:text-gray-400"
                    {
                        "From active recurring transactions only"
                    }
                }

                section class="relative overflow-x-auto shadow-md rounded-lg"
                {
                    @if recurring_transactions.is_empty() {
                        p class="p-6 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No recurring transactions yet. Add wages, rent or subscriptions above."
                        }
                    } @else {
                        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Frequency" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Starts" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                                }
                            }

                            tbody
                            {
                                @for recurring in recurring_transactions {
                                    (recurring_row(recurring))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Recurring", &[dollar_input_styles()], &content)
}

fn recurring_form(today: Date) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::RECURRING_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Add Recurring Transaction" }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for kind in [TransactionType::Expense, TransactionType::Income] {
                        @let id = format!("recurring-type-{}", kind.as_str());

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
                label for="frequency" class=(FORM_LABEL_STYLE) { "Frequency" }

                select
                    name="frequency"
                    id="frequency"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for frequency in Frequency::ALL {
                        option
                            value=(frequency.as_str())
                            selected[frequency == Frequency::Monthly]
                        {
                            (frequency.label())
                        }
                    }
                }
            }

            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "Start Date" }

                input
                    name="start_date"
                    id="start_date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" { (spinner) }
                " Add Recurring Transaction"
            }
        }
    }
}

/// A table row for `recurring` with buttons to pause/resume and delete it.
pub(super) fn recurring_row(recurring: &RecurringTransaction) -> Markup {
    let (sign, amount_style) = match recurring.kind {
        TransactionType::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionType::Expense => ("-", "text-red-600 dark:text-red-400"),
    };
    let (status, status_label, status_style, toggle_label) = if recurring.is_active {
        (
            "active",
            "Active",
            "text-green-800 bg-green-100 dark:bg-green-900 dark:text-green-300",
            "Pause",
        )
    } else {
        (
            "paused",
            "Paused",
            "text-gray-800 bg-gray-100 dark:bg-gray-700 dark:text-gray-300",
            "Resume",
        )
    };
    let toggle_url = format_endpoint(endpoints::TOGGLE_RECURRING, &recurring.id);
    let delete_url = format_endpoint(endpoints::RECURRING_TRANSACTION, &recurring.id);
    let row_style = if recurring.is_active {
        TABLE_ROW_STYLE.to_owned()
    } else {
        format!("{TABLE_ROW_STYLE} opacity-60")
    };

    html! {
        tr class=(row_style)
        {
            td class=(TABLE_CELL_STYLE)
            {
                @if recurring.description.is_empty() {
                    span class="text-gray-400" { "No description" }
                } @else {
                    (recurring.description)
                }
            }
            td class=(TABLE_CELL_STYLE) { span class=(CATEGORY_BADGE_STYLE) { (recurring.category) } }
            td class={ (TABLE_CELL_STYLE) " font-semibold " (amount_style) }
            {
                (sign) (format_currency(recurring.amount))
            }
            td class=(TABLE_CELL_STYLE) { (recurring.frequency.label()) }
            td class=(TABLE_CELL_STYLE) { time datetime=(recurring.start_date) { (recurring.start_date) } }
            td class=(TABLE_CELL_STYLE)
            {
                span
                    data-status=(status)
                    class={ "px-2.5 py-0.5 text-xs font-semibold rounded-full " (status_style) }
                {
                    (status_label)
                }
            }
            td class={ (TABLE_CELL_STYLE) " space-x-2 whitespace-nowrap" }
            {
                button
                    hx-put=(toggle_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_TOGGLE_STYLE)
                {
                    (toggle_label)
                }

                button
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this recurring transaction?"
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

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::{
        endpoints::{self, format_endpoint},
        recurring::{
            RecurringTransactionDraft, get_recurring_page, recurring_page::RecurringViewState,
        },
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form, new_test_tracker, parse_html_document,
        },
        transaction::TransactionType,
    };

    fn get_test_state() -> RecurringViewState {
        RecurringViewState {
            budget_tracker: new_test_tracker(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn renders_form() {
        let response = get_recurring_page(State(get_test_state())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::RECURRING_API, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "start_date", "date");
        assert_form_input(&form, "type", "radio");
        assert_form_submit_button_with_text(&form, "Add Recurring Transaction");

        let options: Vec<_> = form
            .select(&Selector::parse("select[name=frequency] option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(options, vec!["daily", "weekly", "monthly", "yearly"]);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No recurring transactions yet"));
    }

    #[tokio::test]
    async fn lists_recurring_with_projection_and_actions() {
        let state = get_test_state();
        let (salary_id, rent_id) = {
            let mut tracker = state.budget_tracker.lock().unwrap();
            let salary = tracker
                .add_recurring_transaction(RecurringTransactionDraft::new(
                    TransactionType::Income,
                    4000.0,
                    "Salary",
                    "monthly",
                    "2024-01-01",
                ))
                .unwrap();
            let rent = tracker
                .add_recurring_transaction(RecurringTransactionDraft::new(
                    TransactionType::Expense,
                    1200.0,
                    "Bills & Utilities",
                    "monthly",
                    "2024-01-01",
                ))
                .unwrap();
            let gym = tracker
                .add_recurring_transaction(RecurringTransactionDraft::new(
                    TransactionType::Expense,
                    50.0,
                    "Healthcare",
                    "monthly",
                    "2024-01-01",
                ))
                .unwrap();
            tracker.toggle_recurring_active(&gym);
            (salary, rent)
        };

        let response = get_recurring_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let projected = html
            .select(&Selector::parse("#projected-net").unwrap())
            .next()
            .expect("No projected net found")
            .text()
            .collect::<String>();
        assert_eq!(projected.trim(), "$2,800.00");

        let rows: Vec<_> = html.select(&Selector::parse("tbody tr").unwrap()).collect();
        assert_eq!(rows.len(), 3);

        let statuses: Vec<_> = html
            .select(&Selector::parse("[data-status]").unwrap())
            .filter_map(|badge| badge.value().attr("data-status"))
            .collect();
        assert_eq!(statuses, vec!["active", "active", "paused"]);

        let toggle = rows[0]
            .select(&Selector::parse("button[hx-put]").unwrap())
            .next()
            .and_then(|button| button.value().attr("hx-put"));
        assert_eq!(
            toggle,
            Some(format_endpoint(endpoints::TOGGLE_RECURRING, &salary_id).as_str())
        );
        let delete = rows[1]
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .and_then(|button| button.value().attr("hx-delete"));
        assert_eq!(
            delete,
            Some(format_endpoint(endpoints::RECURRING_TRANSACTION, &rent_id).as_str())
        );
    }
}

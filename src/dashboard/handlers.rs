//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the budget overview
//! - HTML view functions for rendering the dashboard UI

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{balance, budget_utilization, count_by_type, current_month_window, sum_by_type},
    dashboard::cards::{MonthSummary, budget_card, summary_cards_view},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, dollar_input_styles, link,
    },
    ledger::{BudgetTracker, Ledger},
    navigation::NavBar,
    timezone::today_in,
    transaction::TransactionType,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The budget tracker to summarise.
    pub budget_tracker: Arc<Mutex<BudgetTracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the budget overview for the current month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;

    let budget_tracker = state
        .budget_tracker
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    Ok(dashboard_view(today, budget_tracker.ledger()).into_response())
}

/// Renders the dashboard for the calendar month containing `today`.
fn dashboard_view(today: Date, ledger: &Ledger) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let this_month = current_month_window(&ledger.transactions, today);
    let summary = MonthSummary {
        balance: balance(&this_month),
        income: sum_by_type(&this_month, TransactionType::Income),
        income_count: count_by_type(&this_month, TransactionType::Income),
        expenses: sum_by_type(&this_month, TransactionType::Expense),
        expense_count: count_by_type(&this_month, TransactionType::Expense),
    };
    let utilization = budget_utilization(ledger.monthly_budget, summary.expenses);
    let month_label = format!("{} {}", today.month(), today.year());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                div class="flex justify-between items-baseline"
                {
                    h2 class="text-2xl font-bold" { "Budget Overview" }
                    span id="current-month" class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        (month_label)
                    }
                }

                (summary_cards_view(&summary))

                (budget_card(&utilization))

                (budget_form(ledger.monthly_budget))

                @if this_month.is_empty() {
                    p class="text-center text-gray-600 dark:text-gray-400"
                    {
                        "No transactions this month. You can add transactions on the "
                        (link(endpoints::TRANSACTIONS_VIEW, "transactions page"))
                        "."
                    }
                }
            }
        }
    );

    base("Dashboard", &[dollar_input_styles()], &content)
}

fn budget_form(monthly_budget: f64) -> Markup {
    html! {
        form
            hx-put=(endpoints::BUDGET_API)
            hx-target-error="#alert-container"
            class={ (CARD_STYLE) " space-y-4" }
        {
            label for="monthly_budget" class=(FORM_LABEL_STYLE) { "Set Monthly Budget" }

            div class="flex gap-2"
            {
                div class="input-wrapper w-full"
                {
                    input
                        name="monthly_budget"
                        id="monthly_budget"
                        type="number"
                        step="0.01"
                        min="0.01"
                        required
                        value=(monthly_budget)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="w-32"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    }
}

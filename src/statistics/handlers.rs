//! The statistics page handler and view.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{
        DEFAULT_DAILY_AVERAGE_WINDOW_DAYS, DEFAULT_TOP_CATEGORIES, DEFAULT_TREND_MONTHS,
        average_per_transaction, daily_average, monthly_trend, projected_monthly_recurring_cost,
        spending_by_weekday, sum_by_category, sum_by_type, top_categories,
    },
    endpoints,
    html::{ECHARTS_SCRIPT_URL, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    ledger::{BudgetTracker, Ledger},
    navigation::NavBar,
    statistics::{
        cards::{Averages, averages_view, top_categories_view},
        charts::{
            StatisticsChart, category_share_chart, category_totals_chart, charts_script,
            charts_view, income_vs_expenses_chart, monthly_trend_chart, weekday_chart,
        },
    },
    timezone::today_in,
    transaction::{Transaction, TransactionType},
};

/// The state needed for the statistics page.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    budget_tracker: Arc<Mutex<BudgetTracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display statistics and charts derived from all transactions.
pub async fn get_statistics_page(State(state): State<StatisticsState>) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;

    let budget_tracker = state
        .budget_tracker
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    let ledger = budget_tracker.ledger();

    if ledger.transactions.is_empty() {
        return Ok(statistics_no_data_view().into_response());
    }

    Ok(statistics_view(today, ledger).into_response())
}

fn statistics_view(today: Date, ledger: &Ledger) -> Markup {
    let nav_bar = NavBar::new(endpoints::STATISTICS_VIEW).into_html();
    let transactions = &ledger.transactions;

    let averages = Averages {
        income_per_transaction: average_per_transaction(transactions, TransactionType::Income),
        expense_per_transaction: average_per_transaction(transactions, TransactionType::Expense),
        daily_spending: daily_average(transactions, DEFAULT_DAILY_AVERAGE_WINDOW_DAYS, today),
        daily_window_days: DEFAULT_DAILY_AVERAGE_WINDOW_DAYS,
        projected_recurring_net: projected_monthly_recurring_cost(&ledger.recurring_transactions),
    };
    let total_expenses = sum_by_type(transactions, TransactionType::Expense);
    let top = top_categories(transactions, TransactionType::Expense, DEFAULT_TOP_CATEGORIES);
    let charts = build_charts(transactions);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                h2 class="text-2xl font-bold" { "Statistics" }

                (averages_view(&averages))

                (top_categories_view(&top, total_expenses))

                (charts_view(&charts))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Statistics", &scripts, &content)
}

/// Creates the charts for the statistics page.
///
/// Category charts are skipped when there is nothing to show for that type.
fn build_charts(transactions: &[Transaction]) -> Vec<StatisticsChart> {
    let mut charts = Vec::new();

    let expenses_by_category = sum_by_category(transactions, TransactionType::Expense);
    if !expenses_by_category.is_empty() {
        charts.push(StatisticsChart {
            id: "expenses-by-category-chart",
            options: category_share_chart("Expenses by Category", &expenses_by_category)
                .to_string(),
        });
    }

    let income_by_category = sum_by_category(transactions, TransactionType::Income);
    if !income_by_category.is_empty() {
        charts.push(StatisticsChart {
            id: "income-by-category-chart",
            options: category_totals_chart("Income by Category", &income_by_category).to_string(),
        });
    }

    charts.push(StatisticsChart {
        id: "monthly-trend-chart",
        options: monthly_trend_chart(
            &monthly_trend(transactions, DEFAULT_TREND_MONTHS),
            DEFAULT_TREND_MONTHS,
        )
        .to_string(),
    });
    charts.push(StatisticsChart {
        id: "income-vs-expenses-chart",
        options: income_vs_expenses_chart(
            sum_by_type(transactions, TransactionType::Income),
            sum_by_type(transactions, TransactionType::Expense),
        )
        .to_string(),
    });
    charts.push(StatisticsChart {
        id: "weekday-chart",
        options: weekday_chart(&spending_by_weekday(transactions)).to_string(),
    });

    charts
}

/// Renders the statistics page when there are no transactions.
fn statistics_no_data_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::STATISTICS_VIEW).into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Statistics and charts will show up here once you start by "
                (transactions_link) "."
            }
        }
    );

    base("Statistics", &[], &content)
}

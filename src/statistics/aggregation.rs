//! Derived statistics over a snapshot of the ledger.
//!
//! Every function here is pure: it only reads its arguments and gives the same
//! answer for the same input. Sums are kept at full precision, rounding to
//! cents only happens when a value is formatted for display.

use std::collections::BTreeMap;

use time::{Date, Duration, Month};

use crate::{
    recurring::RecurringTransaction,
    transaction::{Transaction, TransactionType},
};

/// How many categories [top_categories] returns unless asked otherwise.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;
/// How many months [monthly_trend] returns unless asked otherwise.
pub const DEFAULT_TREND_MONTHS: usize = 6;
/// The trailing window used for the daily spending average.
pub const DEFAULT_DAILY_AVERAGE_WINDOW_DAYS: u32 = 30;
/// Short names for the buckets of [spending_by_weekday].
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The total for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the amounts of the matching transactions.
    pub total: f64,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
    /// Total income in the month.
    pub income: f64,
    /// Total expenses in the month.
    pub expenses: f64,
}

impl MonthlySummary {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// How much of the monthly budget has been spent.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUtilization {
    /// The monthly budget.
    pub budget: f64,
    /// Expenses in the current month.
    pub spent: f64,
    /// Budget left to spend, negative once the budget is exceeded.
    pub remaining: f64,
    /// Expenses as a percentage of the budget.
    ///
    /// `None` when the budget is zero or negative, there is no meaningful
    /// ratio in that case. May exceed 100 when overspending.
    pub percent_used: Option<f64>,
}

impl BudgetUtilization {
    /// The percentage to draw on a progress indicator, always within [0, 100].
    ///
    /// An undefined utilization is drawn as full.
    pub fn progress_percent(&self) -> f64 {
        match self.percent_used {
            Some(percent) if percent.is_nan() => 100.0,
            Some(percent) => percent.clamp(0.0, 100.0),
            None => 100.0,
        }
    }
}

/// The transactions dated in the same calendar month and year as `reference_date`.
pub fn current_month_window(
    transactions: &[Transaction],
    reference_date: Date,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == reference_date.year()
                && transaction.date.month() == reference_date.month()
        })
        .cloned()
        .collect()
}

/// The sum of the amounts of all transactions of type `kind`.
///
/// Returns zero if there are no matching transactions.
pub fn sum_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

/// The number of transactions of type `kind`.
pub fn count_by_type(transactions: &[Transaction], kind: TransactionType) -> usize {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .count()
}

/// Total income minus total expenses.
///
/// The budget overview calls this with the [current_month_window].
pub fn balance(transactions: &[Transaction]) -> f64 {
    sum_by_type(transactions, TransactionType::Income)
        - sum_by_type(transactions, TransactionType::Expense)
}

/// Compare the current month's expenses against the monthly budget.
pub fn budget_utilization(monthly_budget: f64, current_month_expenses: f64) -> BudgetUtilization {
    let percent_used = if monthly_budget > 0.0 {
        Some(current_month_expenses / monthly_budget * 100.0)
    } else {
        None
    };

    BudgetUtilization {
        budget: monthly_budget,
        spent: current_month_expenses,
        remaining: monthly_budget - current_month_expenses,
        percent_used,
    }
}

/// Sum the amounts of transactions of type `kind` per category.
///
/// Categories are listed in the order they are first seen in `transactions`.
/// Categories without a matching transaction are not included.
pub fn sum_by_category(transactions: &[Transaction], kind: TransactionType) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals
}

/// The `n` categories with the largest totals, largest first.
///
/// Ties keep the order in which the categories first appear in `transactions`.
pub fn top_categories(
    transactions: &[Transaction],
    kind: TransactionType,
    n: usize,
) -> Vec<CategoryTotal> {
    let mut totals = sum_by_category(transactions, kind);
    // `sort_by` is stable, so equal totals stay in encounter order.
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals.truncate(n);
    totals
}

/// Income and expenses per calendar month, oldest first, limited to the last
/// `months_back` months that have transactions.
///
/// Months without any transactions are left out rather than filled with zeros.
pub fn monthly_trend(transactions: &[Transaction], months_back: usize) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u8), MonthlySummary> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.date;
        let summary = months
            .entry((date.year(), u8::from(date.month())))
            .or_insert_with(|| MonthlySummary {
                year: date.year(),
                month: date.month(),
                income: 0.0,
                expenses: 0.0,
            });

        match transaction.kind {
            TransactionType::Income => summary.income += transaction.amount,
            TransactionType::Expense => summary.expenses += transaction.amount,
        }
    }

    let skip = months.len().saturating_sub(months_back);

    months.into_values().skip(skip).collect()
}

/// The mean amount of transactions of type `kind`, or zero if there are none.
pub fn average_per_transaction(transactions: &[Transaction], kind: TransactionType) -> f64 {
    match count_by_type(transactions, kind) {
        0 => 0.0,
        count => sum_by_type(transactions, kind) / count as f64,
    }
}

/// The average daily spend over the `window_days` days up to and including
/// `reference_date`.
///
/// Expenses dated from `reference_date - window_days` through `reference_date`
/// are summed and divided by `window_days`, not by the number of days that
/// had spending. A zero-length window gives zero.
pub fn daily_average(transactions: &[Transaction], window_days: u32, reference_date: Date) -> f64 {
    if window_days == 0 {
        return 0.0;
    }

    let window_start = reference_date
        .checked_sub(Duration::days(i64::from(window_days)))
        .unwrap_or(Date::MIN);

    let total: f64 = transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == TransactionType::Expense
                && transaction.date >= window_start
                && transaction.date <= reference_date
        })
        .map(|transaction| transaction.amount)
        .sum();

    total / f64::from(window_days)
}

/// The net monthly cash flow of the active recurring transactions.
///
/// Each amount is converted to a monthly equivalent, income adds to the
/// projection and expenses subtract from it. Inactive entries are ignored.
pub fn projected_monthly_recurring_cost(recurring_transactions: &[RecurringTransaction]) -> f64 {
    recurring_transactions
        .iter()
        .filter(|recurring| recurring.is_active)
        .map(|recurring| {
            let monthly_amount = recurring.frequency.monthly_equivalent(recurring.amount);

            match recurring.kind {
                TransactionType::Income => monthly_amount,
                TransactionType::Expense => -monthly_amount,
            }
        })
        .sum()
}

/// Total expenses per day of the week, indexed from Sunday (0) to Saturday (6).
pub fn spending_by_weekday(transactions: &[Transaction]) -> [f64; 7] {
    let mut totals = [0.0; 7];

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        let day = usize::from(transaction.date.weekday().number_days_from_sunday());
        totals[day] += transaction.amount;
    }

    totals
}

/// `part` as a percentage of `total`, or zero when `total` is zero.
pub fn percentage_of_total(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

//! Card components for the budget overview.
//!
//! Provides cards showing:
//! - The balance, income and expenses for the current month
//! - How much of the monthly budget has been used, with a progress bar

use maud::{Markup, html};

use crate::{
    aggregation::BudgetUtilization,
    html::{
        CARD_STYLE, PROGRESS_FILL_STYLE, PROGRESS_OVER_STYLE, format_currency, format_percentage,
        progress_bar,
    },
};

const POSITIVE_STYLE: &str = "text-green-600 dark:text-green-400";
const NEGATIVE_STYLE: &str = "text-red-600 dark:text-red-400";

/// The totals shown on the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthSummary {
    pub balance: f64,
    pub income: f64,
    pub income_count: usize,
    pub expenses: f64,
    pub expense_count: usize,
}

/// Renders the balance, income and expense cards.
pub(super) fn summary_cards_view(summary: &MonthSummary) -> Markup {
    let balance_style = if summary.balance < 0.0 {
        NEGATIVE_STYLE
    } else {
        POSITIVE_STYLE
    };

    html! {
        div class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (summary_card("balance", "Balance", format_currency(summary.balance), balance_style, "This month"))
            (summary_card(
                "income",
                "Income",
                format_currency(summary.income),
                POSITIVE_STYLE,
                &transaction_count_label(summary.income_count),
            ))
            (summary_card(
                "expenses",
                "Expenses",
                format_currency(summary.expenses),
                NEGATIVE_STYLE,
                &transaction_count_label(summary.expense_count),
            ))
        }
    }
}

fn transaction_count_label(count: usize) -> String {
    match count {
        1 => "1 transaction".to_owned(),
        count => format!("{count} transactions"),
    }
}

fn summary_card(id: &str, title: &str, value: String, value_style: &str, caption: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p data-value class={ "text-2xl font-bold " (value_style) } { (value) }
            p class="text-xs text-gray-500 dark:text-gray-400" { (caption) }
        }
    }
}

/// Renders the card comparing this month's expenses against the budget.
pub(super) fn budget_card(utilization: &BudgetUtilization) -> Markup {
    let percent_used = utilization
        .percent_used
        .map(format_percentage)
        .unwrap_or_else(|| "n/a".to_owned());
    let remaining_style = if utilization.remaining < 0.0 {
        NEGATIVE_STYLE
    } else {
        POSITIVE_STYLE
    };
    let is_over_budget = utilization.remaining < 0.0;
    let bar_style = if is_over_budget || utilization.percent_used.is_none() {
        PROGRESS_OVER_STYLE
    } else {
        PROGRESS_FILL_STYLE
    };

    html! {
        div id="budget" class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h3 class="text-lg font-semibold" { "Monthly Budget" }
                span id="budget-used" class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (percent_used) " used"
                }
            }

            (progress_bar(utilization.progress_percent(), bar_style))

            div class="flex justify-between text-sm"
            {
                span
                {
                    (format_currency(utilization.spent)) " of " (format_currency(utilization.budget))
                }
                span id="budget-remaining" class=(remaining_style)
                {
                    (format_currency(utilization.remaining)) " remaining"
                }
            }

            @if is_over_budget {
                p id="over-budget" class={ "mt-2 text-sm font-semibold " (NEGATIVE_STYLE) }
                {
                    "Over budget!"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::aggregation::budget_utilization;

    use super::*;

    fn progress_value(html: &Html) -> String {
        html.select(&Selector::parse("[role=progressbar]").unwrap())
            .next()
            .and_then(|bar| bar.value().attr("aria-valuenow"))
            .expect("No progress bar found")
            .to_owned()
    }

    fn progress_fill_class(html: &Html) -> String {
        html.select(&Selector::parse("[role=progressbar] > div").unwrap())
            .next()
            .and_then(|fill| fill.value().attr("class"))
            .expect("No progress bar fill found")
            .to_owned()
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element matching {selector}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[test]
    fn budget_card_shows_utilization() {
        let card = budget_card(&budget_utilization(3000.0, 50.0));
        let html = Html::parse_fragment(&card.into_string());

        assert_eq!(text_of(&html, "#budget-used"), "1.7% used");
        assert_eq!(text_of(&html, "#budget-remaining"), "$2,950.00 remaining");
        assert_eq!(progress_value(&html), "1.7");
        assert_eq!(progress_fill_class(&html), PROGRESS_FILL_STYLE);
        assert!(html.select(&Selector::parse("#over-budget").unwrap()).next().is_none());
    }

    #[test]
    fn progress_bar_is_clamped_when_over_budget() {
        let card = budget_card(&budget_utilization(100.0, 150.0));
        let html = Html::parse_fragment(&card.into_string());

        assert_eq!(text_of(&html, "#budget-used"), "150.0% used");
        assert_eq!(text_of(&html, "#budget-remaining"), "-$50.00 remaining");
        assert_eq!(progress_value(&html), "100.0");
        assert_eq!(progress_fill_class(&html), PROGRESS_OVER_STYLE);
        assert_eq!(text_of(&html, "#over-budget"), "Over budget!");
    }

    #[test]
    fn undefined_utilization_is_full_red_bar() {
        let card = budget_card(&budget_utilization(0.0, 10.0));
        let html = Html::parse_fragment(&card.into_string());

        assert_eq!(text_of(&html, "#budget-used"), "n/a used");
        assert_eq!(progress_value(&html), "100.0");
        assert_eq!(progress_fill_class(&html), PROGRESS_OVER_STYLE);
    }

    #[test]
    fn counts_are_pluralized() {
        assert_eq!(transaction_count_label(0), "0 transactions");
        assert_eq!(transaction_count_label(1), "1 transaction");
        assert_eq!(transaction_count_label(3), "3 transactions");
    }
}

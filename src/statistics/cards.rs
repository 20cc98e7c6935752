//! Card components for the statistics page.

use maud::{Markup, html};

use crate::{
    aggregation::{CategoryTotal, percentage_of_total},
    html::{CARD_STYLE, PROGRESS_FILL_STYLE, format_currency, format_percentage, progress_bar},
};

/// The figures shown on the statistics cards.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Averages {
    pub income_per_transaction: f64,
    pub expense_per_transaction: f64,
    pub daily_spending: f64,
    pub daily_window_days: u32,
    pub projected_recurring_net: f64,
}

pub(super) fn averages_view(averages: &Averages) -> Markup {
    let projected_style = if averages.projected_recurring_net < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
        {
            (stat_card(
                "average-income",
                "Average Income",
                &format_currency(averages.income_per_transaction),
                "text-green-600 dark:text-green-400",
                "Per transaction",
            ))
            (stat_card(
                "average-expense",
                "Average Expense",
                &format_currency(averages.expense_per_transaction),
                "text-red-600 dark:text-red-400",
                "Per transaction",
            ))
            (stat_card(
                "daily-average",
                "Daily Spending",
                &format_currency(averages.daily_spending),
                "text-gray-900 dark:text-white",
                &format!("Average over the last {} days", averages.daily_window_days),
            ))
            (stat_card(
                "projected-recurring",
                "Recurring Net",
                &format_currency(averages.projected_recurring_net),
                projected_style,
                "Projected per month",
            ))
        }
    }
}

fn stat_card(id: &str, title: &str, value: &str, value_style: &str, caption: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p data-value class={ "text-2xl font-bold " (value_style) } { (value) }
            p class="text-xs text-gray-500 dark:text-gray-400" { (caption) }
        }
    }
}

/// Lists the largest expense categories with their share of `total_expenses`.
pub(super) fn top_categories_view(top: &[CategoryTotal], total_expenses: f64) -> Markup {
    html! {
        section id="top-categories" class=(CARD_STYLE)
        {
            h3 class="text-xl font-semibold mb-4" { "Top Spending Categories" }

            @if top.is_empty() {
                p class="text-sm text-gray-600 dark:text-gray-400" { "No expenses recorded yet." }
            } @else {
                ol class="space-y-3"
                {
                    @for (rank, category) in top.iter().enumerate() {
                        @let share = percentage_of_total(category.total, total_expenses);

                        li
                        {
                            div class="flex justify-between text-sm mb-1"
                            {
                                span class="font-medium"
                                {
                                    (rank + 1) ". " (category.category)
                                }
                                span
                                {
                                    (format_currency(category.total))
                                    " (" (format_percentage(share)) ")"
                                }
                            }

                            (progress_bar(share, PROGRESS_FILL_STYLE))
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::aggregation::CategoryTotal;

    use super::{Averages, averages_view, top_categories_view};

    #[test]
    fn shows_share_of_total_expenses() {
        let top = vec![
            CategoryTotal {
                category: "Food & Dining".to_owned(),
                total: 75.0,
            },
            CategoryTotal {
                category: "Travel".to_owned(),
                total: 25.0,
            },
        ];

        let html = Html::parse_fragment(&top_categories_view(&top, 100.0).into_string());

        let items: Vec<String> = html
            .select(&Selector::parse("li").unwrap())
            .map(|item| item.text().collect::<String>())
            .collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].contains("1. Food & Dining"), "got {:?}", items[0]);
        assert!(items[0].contains("$75.00 (75.0%)"), "got {:?}", items[0]);
        assert!(items[1].contains("2. Travel"), "got {:?}", items[1]);
        assert!(items[1].contains("(25.0%)"), "got {:?}", items[1]);
    }

    #[test]
    fn empty_top_categories() {
        let html = Html::parse_fragment(&top_categories_view(&[], 0.0).into_string());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No expenses recorded yet."));
    }

    #[test]
    fn shows_daily_window() {
        let averages = Averages {
            income_per_transaction: 1000.0,
            expense_per_transaction: 25.0,
            daily_spending: 1.5,
            daily_window_days: 30,
            projected_recurring_net: -15.99,
        };

        let html = Html::parse_fragment(&averages_view(&averages).into_string());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Average over the last 30 days"));
        assert!(text.contains("-$15.99"));
        assert!(text.contains("$1.50"));
    }
}

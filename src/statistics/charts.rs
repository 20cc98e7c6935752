//! Chart generation and rendering for the statistics page.
//!
//! This module creates interactive ECharts visualizations:
//! - **Expenses by Category**: Share of all expenses per category
//! - **Income by Category**: Total income per category
//! - **Monthly Trend**: Income and expenses for recent months
//! - **Income vs Expenses**: All-time totals side by side
//! - **Spending by Weekday**: Total expenses per day of the week
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{CategoryTotal, MonthlySummary, WEEKDAY_LABELS},
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct StatisticsChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the charts.
pub(super) fn charts_view(charts: &[StatisticsChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[StatisticsChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_inline_script(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Escapes the sequences that would end or comment out an inline `<script>` element.
///
/// `<\/` and `<\!` are read back as `</` and `<!` inside JavaScript strings, so
/// category names still display unchanged.
fn escape_inline_script(source: &str) -> String {
    source.replace("</", "<\\/").replace("<!", "<\\!")
}

/// A pie chart of the share of each category, `totals` should not be empty.
pub(super) fn category_share_chart(title: &str, totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|total| (total.total, total.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["35%", "65%"])
                .data(data),
        )
}

/// A bar chart with one bar per category.
pub(super) fn category_totals_chart(title: &str, totals: &[CategoryTotal]) -> Chart {
    let labels: Vec<String> = totals.iter().map(|total| total.category.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|total| total.total).collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name(title).data(values))
}

/// Income and expense lines for each month in `trend`.
pub(super) fn monthly_trend_chart(trend: &[MonthlySummary], months_back: usize) -> Chart {
    let labels: Vec<String> = trend.iter().map(month_label).collect();
    let income: Vec<f64> = trend.iter().map(|month| month.income).collect();
    let expenses: Vec<f64> = trend.iter().map(|month| month.expenses).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Trend")
                .subtext(format!("Last {months_back} months with activity")),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(80)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expenses").data(expenses))
}

/// Total income and total expenses side by side.
pub(super) fn income_vs_expenses_chart(income: f64, expenses: f64) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expenses").subtext("All time"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Income".to_owned(), "Expenses".to_owned()]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Amount")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(vec![income, expenses]),
        )
}

/// Total expenses per day of the week, starting on Sunday.
pub(super) fn weekday_chart(spending: &[f64; 7]) -> Chart {
    Chart::new()
        .title(Title::new().text("Spending by Weekday"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(WEEKDAY_LABELS.map(str::to_owned).to_vec()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Expenses").data(spending.to_vec()))
}

/// A short label for the month, e.g. "Jan 2024".
fn month_label(summary: &MonthlySummary) -> String {
    let month = summary.month.to_string();
    let short_month: String = month.chars().take(3).collect();

    format!("{short_month} {}", summary.year)
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        // Use USD instead of NZD since it is easier to read (No 'NZ' prefix)
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

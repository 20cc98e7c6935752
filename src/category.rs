//! Suggested categories and the category picker shared by the transaction forms.
//!
//! Categories are free-form labels, these lists are only what the forms offer.

use maud::{Markup, html};

use crate::{html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE}, transaction::TransactionType};

/// Categories offered for expenses.
pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Other",
];

/// Categories offered for income.
pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investment", "Gift", "Other"];

/// The suggested categories for `kind`.
pub fn suggested_categories(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// A required select input named "category", grouped by transaction type.
pub fn category_select() -> Markup {
    html! {
        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select
                id="category"
                name="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected { "Select a category" }

                @for kind in [TransactionType::Expense, TransactionType::Income] {
                    optgroup label=(kind.label())
                    {
                        @for category in suggested_categories(kind) {
                            option value=(category) { (category) }
                        }
                    }
                }
            }
        }
    }
}

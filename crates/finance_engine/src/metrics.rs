use models::{Category, CategoryTotals, LineItem, Metrics, SummaryTotals};
use tracing::debug;

use crate::format::{percent_of, round2};

/// Aggregates normalized income and expense items into budget metrics.
///
/// Expense items tagged `Savings` are tracked separately from actual
/// expenses. With zero income the savings rate is reported as 0.
pub fn compute_metrics(income: &[LineItem], expenses: &[LineItem]) -> Metrics {
    let (savings_items, actual_expenses): (Vec<LineItem>, Vec<LineItem>) = expenses
        .iter()
        .cloned()
        .partition(|item| item.category == Category::Savings);

    let total_income = sum(income);
    let total_savings = sum(&savings_items);
    let total_expenses = sum(&actual_expenses);

    // Tracked savings plus whatever is left unallocated
    let leftover_money = total_income - total_expenses - total_savings;
    let actual_monthly_savings = total_savings + leftover_money;
    let savings_rate = percent_of(actual_monthly_savings, total_income);

    debug!(
        total_income,
        total_expenses, total_savings, savings_rate, "computed budget metrics"
    );

    Metrics {
        total_income,
        total_expenses,
        total_savings,
        leftover_money,
        actual_monthly_savings,
        savings_rate,
        overspending: total_expenses + total_savings > total_income,
        income_by_category: group_by_category(income),
        expenses_by_category: group_by_category(&actual_expenses),
        savings_by_category: group_by_category(&savings_items),
        income_items: income.to_vec(),
        expense_items: expenses.to_vec(),
        savings_items,
    }
}

/// Totals-only variant: every expense counts as an outflow.
pub fn compute_summary(income: &[LineItem], expenses: &[LineItem]) -> SummaryTotals {
    let total_income = sum(income);
    let total_expenses = sum(expenses);

    SummaryTotals {
        total_income: round2(total_income),
        total_expenses: round2(total_expenses),
        balance: round2(total_income - total_expenses),
    }
}

/// Sums amounts per category, keeping the order in which categories first appear.
pub fn group_by_category(items: &[LineItem]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for item in items {
        *totals.entry(item.category).or_insert(0.0) += item.amount;
    }
    totals
}

fn sum(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

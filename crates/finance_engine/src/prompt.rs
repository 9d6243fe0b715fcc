use models::{CategoryTotals, Metrics};

use crate::format::{fixed1, fixed2, grouped, percent_of};

/// Builds the advisor prompt sent to an external language model.
pub fn build_advisor_prompt(metrics: &Metrics, goals: Option<&str>) -> String {
    let expense_ratio = percent_of(metrics.total_expenses, metrics.total_income);
    let status = if metrics.overspending {
        "Overspending"
    } else {
        "Balanced"
    };
    let goals = goals.map(str::trim).filter(|g| !g.is_empty());

    let mut lines = vec![
        "Financial Advisor for South Africa (Currency: Rands - R)\n".to_string(),
        "Profile:".to_string(),
        format!("- Income: R{}/month", grouped(metrics.total_income)),
        format!(
            "- Expenses: R{}/month ({}%)",
            grouped(metrics.total_expenses),
            fixed1(expense_ratio)
        ),
        format!(
            "- Savings: R{}/month ({}%)",
            fixed2(metrics.actual_monthly_savings),
            fixed1(metrics.savings_rate)
        ),
        format!("- Status: {status}"),
        format!("- Goals: {}\n", goals.unwrap_or("None specified")),
        "Income Sources:".to_string(),
    ];
    lines.extend(category_lines(&metrics.income_by_category));

    lines.push("\nSpending:".to_string());
    lines.extend(category_lines(&metrics.expenses_by_category));
    if !metrics.savings_by_category.is_empty() {
        lines.push(format!("- Savings allocations: R{}", grouped(metrics.total_savings)));
    }

    lines.push(
        "\nProvide:\n\
         1. Financial health summary\n\
         2. Top 3 actionable recommendations\n\
         3. This month's action steps\n\n\
         Keep it professional and practical."
            .to_string(),
    );

    lines.join("\n")
}

/// Wraps a free-form user question in the finance coach instructions.
pub fn build_chat_prompt(user_message: &str) -> String {
    format!(
        "You are an AI Finance Coach. Respond clearly, with practical financial guidance.\n\nUser: {}\n",
        user_message.trim()
    )
}

fn category_lines(totals: &CategoryTotals) -> impl Iterator<Item = String> + '_ {
    totals
        .iter()
        .map(|(category, amount)| format!("- {}: R{}", category, grouped(*amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use models::{Category, LineItem};

    #[test]
    fn test_prompt_lists_profile_and_categories() {
        let income = vec![
            LineItem::new("Pay", Category::Salary, 25000.0),
            LineItem::new("Gig", Category::Freelance, 5000.0),
        ];
        let expenses = vec![
            LineItem::new("Rent", Category::Housing, 9000.0),
            LineItem::new("TFSA", Category::Savings, 3000.0),
        ];
        let metrics = compute_metrics(&income, &expenses);

        let prompt = build_advisor_prompt(&metrics, Some("Buy a house"));
        assert!(prompt.contains("- Income: R30,000/month"));
        assert!(prompt.contains("- Expenses: R9,000/month (30.0%)"));
        assert!(prompt.contains("- Savings: R21000.00/month (70.0%)"));
        assert!(prompt.contains("- Status: Balanced"));
        assert!(prompt.contains("- Goals: Buy a house"));
        assert!(prompt.contains("- Salary: R25,000\n- Freelance: R5,000"));
        assert!(prompt.contains("- Housing: R9,000"));
        assert!(prompt.contains("- Savings allocations: R3,000"));
        assert!(prompt.ends_with("Keep it professional and practical."));
    }

    #[test]
    fn test_chat_prompt_wraps_message() {
        let prompt = build_chat_prompt("  How do I start an emergency fund? ");
        assert!(prompt.starts_with("You are an AI Finance Coach."));
        assert!(prompt.ends_with("User: How do I start an emergency fund?\n"));
    }

    #[test]
    fn test_prompt_without_goals() {
        let metrics = compute_metrics(&[LineItem::unnamed(100.0)], &[LineItem::unnamed(150.0)]);
        let prompt = build_advisor_prompt(&metrics, None);
        assert!(prompt.contains("- Goals: None specified"));
        assert!(prompt.contains("- Status: Overspending"));
    }
}

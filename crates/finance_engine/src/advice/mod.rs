//! Deterministic, rule-based financial advice.
//!
//! The report is driven by an [`AdviceTier`] chosen from the overspending
//! flag and the savings rate. Every tier renders the same header, overview
//! and insight blocks, then its own recommendations, checklist and closing
//! line from an [`AdviceContext`].

mod templates;

use models::{Category, Metrics};
use serde::{Deserialize, Serialize};

use crate::format::{fixed1, fixed2, grouped, percent_of};

pub(crate) const RULE: &str = "==================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdviceTier {
    Critical,
    NeedsImprovement,
    Healthy,
    Excellent,
    Outstanding,
}

impl AdviceTier {
    /// Overspending wins; otherwise the savings rate picks the tier, with
    /// each boundary (10, 20, 30) belonging to the higher tier.
    pub fn select(overspending: bool, savings_rate: f64) -> Self {
        if overspending {
            AdviceTier::Critical
        } else if savings_rate < 10.0 {
            AdviceTier::NeedsImprovement
        } else if savings_rate < 20.0 {
            AdviceTier::Healthy
        } else if savings_rate < 30.0 {
            AdviceTier::Excellent
        } else {
            AdviceTier::Outstanding
        }
    }

    pub fn for_metrics(metrics: &Metrics) -> Self {
        Self::select(metrics.overspending, metrics.savings_rate)
    }

    pub fn label(self) -> &'static str {
        match self {
            AdviceTier::Critical => "CRITICAL",
            AdviceTier::NeedsImprovement => "NEEDS IMPROVEMENT",
            AdviceTier::Healthy => "HEALTHY",
            AdviceTier::Excellent => "EXCELLENT",
            AdviceTier::Outstanding => "OUTSTANDING",
        }
    }

    /// Savings-rate target the tier's recommendations push towards.
    pub fn target_rate(self) -> Option<f64> {
        match self {
            AdviceTier::NeedsImprovement => Some(10.0),
            AdviceTier::Healthy => Some(20.0),
            AdviceTier::Excellent => Some(30.0),
            AdviceTier::Critical | AdviceTier::Outstanding => None,
        }
    }

    fn rating(self, ctx: &AdviceContext<'_>) -> String {
        let rate = fixed1(ctx.savings_rate);
        match self {
            AdviceTier::Critical => "Spending exceeds income - immediate action needed".to_string(),
            AdviceTier::NeedsImprovement => format!("{rate}% savings rate - aim for 10-20%"),
            AdviceTier::Healthy => format!("{rate}% savings rate - on track"),
            AdviceTier::Excellent => format!("{rate}% savings rate - strong performance"),
            AdviceTier::Outstanding => format!("{rate}% savings rate - exceptional!"),
        }
    }

    fn render_tier(self, ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
        match self {
            AdviceTier::Critical => templates::critical(ctx, out),
            AdviceTier::NeedsImprovement => templates::needs_improvement(ctx, out),
            AdviceTier::Healthy => templates::healthy(ctx, out),
            AdviceTier::Excellent => templates::excellent(ctx, out),
            AdviceTier::Outstanding => templates::outstanding(ctx, out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LargestExpense {
    pub category: Category,
    pub amount: f64,
    pub share_pct: f64,
}

/// Every figure a template may print, computed once from the metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceContext<'a> {
    pub total_income: f64,
    pub total_expenses: f64,
    pub monthly_savings: f64,
    pub savings_rate: f64,
    pub expense_ratio: f64,
    /// Amount by which expenses plus savings allocations exceed income.
    pub shortfall: f64,
    pub largest_expense: Option<LargestExpense>,
    pub income_sources: usize,
    pub emergency_fund_months: Option<f64>,
    pub emergency_fund_target: f64,
    pub goals: Option<&'a str>,
}

impl<'a> AdviceContext<'a> {
    pub fn new(metrics: &Metrics, goals: Option<&'a str>) -> Self {
        let monthly_savings = metrics.actual_monthly_savings;

        // Ties keep the category seen first
        let largest_expense = metrics
            .expenses_by_category
            .iter()
            .fold(None::<(Category, f64)>, |best, (cat, amount)| match best {
                Some((_, top)) if top >= *amount => best,
                _ => Some((*cat, *amount)),
            })
            .map(|(category, amount)| LargestExpense {
                category,
                amount,
                share_pct: percent_of(amount, metrics.total_expenses),
            });

        let emergency_fund_months = (monthly_savings > 0.0)
            .then(|| metrics.total_expenses * 6.0 / monthly_savings);

        Self {
            total_income: metrics.total_income,
            total_expenses: metrics.total_expenses,
            monthly_savings,
            savings_rate: metrics.savings_rate,
            expense_ratio: percent_of(metrics.total_expenses, metrics.total_income),
            shortfall: (-metrics.leftover_money).max(0.0),
            largest_expense,
            income_sources: metrics.income_by_category.len(),
            emergency_fund_months,
            emergency_fund_target: metrics.total_expenses * 6.0,
            goals: goals.map(str::trim).filter(|g| !g.is_empty()),
        }
    }

    /// Target monthly savings and the gap to it for a given rate.
    pub fn target_gap(&self, rate_pct: f64) -> (f64, f64) {
        let target = self.total_income * rate_pct / 100.0;
        (target, target - self.monthly_savings)
    }
}

/// Renders the full rule-based report for `metrics`.
pub fn generate_advice(metrics: &Metrics, goals: Option<&str>) -> String {
    let ctx = AdviceContext::new(metrics, goals);
    render(AdviceTier::for_metrics(metrics), &ctx)
}

pub fn render(tier: AdviceTier, ctx: &AdviceContext<'_>) -> String {
    let mut out = Vec::with_capacity(64);

    out.push("FINANCIAL HEALTH ANALYSIS".to_string());
    out.push(format!("{RULE}\n"));
    out.push(format!("STATUS: {}\n{}\n", tier.label(), tier.rating(ctx)));

    out.push("Monthly Overview:".to_string());
    out.push(format!("- Income: R{}", grouped(ctx.total_income)));
    out.push(format!("- Expenses: R{} ({}%)", grouped(ctx.total_expenses), fixed1(ctx.expense_ratio)));
    out.push(format!("- Savings: R{} ({}%)\n", fixed2(ctx.monthly_savings), fixed1(ctx.savings_rate)));

    out.push("Key Insights:".to_string());
    if let Some(top) = ctx.largest_expense {
        out.push(format!("- Largest expense: {} (R{}, {}%)", top.category, grouped(top.amount), fixed1(top.share_pct)));
    }
    let remark = if ctx.income_sources > 1 {
        "(good diversification)"
    } else {
        "(consider adding more)"
    };
    out.push(format!("- Income sources: {} {}", ctx.income_sources, remark));
    if let Some(months) = ctx.emergency_fund_months {
        out.push(format!("- Emergency fund timeline: {} months at current rate", fixed1(months)));
    }
    if let Some(goals) = ctx.goals {
        out.push(format!("- Your goals: {goals}"));
    }

    out.push(format!("\n{RULE}\nTOP 3 RECOMMENDATIONS\n{RULE}\n"));
    tier.render_tier(ctx, &mut out);
    out.push(RULE.to_string());

    let mut report = out.join("\n");
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use models::LineItem;

    fn metrics(income: f64, expenses: f64) -> Metrics {
        compute_metrics(&[LineItem::unnamed(income)], &[LineItem::unnamed(expenses)])
    }

    #[test]
    fn test_report_layout() {
        let report = generate_advice(&metrics(5000.0, 3000.0), None);
        assert!(report.starts_with(&format!("FINANCIAL HEALTH ANALYSIS\n{RULE}\n\nSTATUS: OUTSTANDING\n")));
        assert!(report.contains("\nMonthly Overview:\n- Income: R5,000\n- Expenses: R3,000 (60.0%)\n"));
        assert!(report.ends_with(&format!("\n{RULE}\n")));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AdviceTier::select(true, 50.0), AdviceTier::Critical);
        assert_eq!(AdviceTier::select(false, -1.0), AdviceTier::NeedsImprovement);
        assert_eq!(AdviceTier::select(false, 0.0), AdviceTier::NeedsImprovement);
        assert_eq!(AdviceTier::select(false, 9.99), AdviceTier::NeedsImprovement);
        assert_eq!(AdviceTier::select(false, 10.0), AdviceTier::Healthy);
        assert_eq!(AdviceTier::select(false, 19.99), AdviceTier::Healthy);
        assert_eq!(AdviceTier::select(false, 20.0), AdviceTier::Excellent);
        assert_eq!(AdviceTier::select(false, 29.99), AdviceTier::Excellent);
        assert_eq!(AdviceTier::select(false, 30.0), AdviceTier::Outstanding);
    }

    #[test]
    fn test_outstanding_example() {
        let income = vec![LineItem::new("Pay", Category::Salary, 20000.0)];
        let expenses = vec![
            LineItem::new("Rent", Category::Housing, 8000.0),
            LineItem::new("TFSA", Category::Savings, 2000.0),
        ];
        let m = compute_metrics(&income, &expenses);
        assert_eq!(AdviceTier::for_metrics(&m), AdviceTier::Outstanding);

        let text = generate_advice(&m, None);
        assert!(text.contains("STATUS: OUTSTANDING"));
        assert!(text.contains("60.0% savings rate - exceptional!"));
        assert!(text.contains("- Income: R20,000"));
        assert!(text.contains("- Expenses: R8,000 (40.0%)"));
        assert!(text.contains("- Savings: R12000.00 (60.0%)"));
        assert!(text.contains("- Largest expense: Housing (R8,000, 100.0%)"));
        assert!(text.contains("- Income sources: 1 (consider adding more)"));
        assert!(text.contains("- Emergency fund timeline: 4.0 months at current rate"));
        assert!(text.contains("Invest R7200.00 in growth ETFs"));
        assert!(text.contains("Annual savings power: R144,000"));
        assert!(!text.contains("Your goals"));
    }

    #[test]
    fn test_critical_reports_shortfall() {
        let m = metrics(10000.0, 12000.0);
        let text = generate_advice(&m, Some("Pay off my car"));

        assert!(text.contains("STATUS: CRITICAL"));
        assert!(text.contains("Deficit: R2000.00/month"));
        assert!(text.contains("Even R2000.00 extra would balance budget"));
        assert!(text.contains("- Your goals: Pay off my car"));
        assert!(!text.contains("Emergency fund timeline"));
        assert!(text.contains("You can do this!"));
    }

    #[test]
    fn test_critical_shortfall_counts_savings_allocations() {
        let income = vec![LineItem::new("Pay", Category::Salary, 10000.0)];
        let expenses = vec![
            LineItem::new("Rent", Category::Housing, 8000.0),
            LineItem::new("Invest", Category::Savings, 3000.0),
        ];
        let text = generate_advice(&compute_metrics(&income, &expenses), None);
        assert!(text.contains("STATUS: CRITICAL"));
        assert!(text.contains("Deficit: R1000.00/month"));
    }

    #[test]
    fn test_needs_improvement_targets_ten_percent() {
        // 5% savings rate
        let text = generate_advice(&metrics(10000.0, 9500.0), None);
        assert!(text.contains("STATUS: NEEDS IMPROVEMENT"));
        assert!(text.contains("Current: R500.00 (5.0%)"));
        assert!(text.contains("Target: R1000.00 (10%)"));
        assert!(text.contains("Increase by: R500.00/month"));
        assert!(text.contains("Target: R57,000 (6 months)"));
    }

    #[test]
    fn test_healthy_targets_twenty_percent() {
        let text = generate_advice(&metrics(10000.0, 9000.0), None);
        assert!(text.contains("STATUS: HEALTHY"));
        assert!(text.contains("Target: R2000.00/month"));
        assert!(text.contains("Increase by: R1000.00"));
    }

    #[test]
    fn test_excellent_targets_thirty_percent() {
        let text = generate_advice(&metrics(10000.0, 7500.0), Some("Retire early"));
        assert!(text.contains("STATUS: EXCELLENT"));
        assert!(text.contains("Target: R3000.00/month"));
        assert!(text.contains("Increase by: R500.00"));
        assert!(text.contains("- Your goals: Retire early"));
    }

    #[test]
    fn test_each_tier_has_distinct_closing() {
        let closings: Vec<String> = [
            metrics(10000.0, 12000.0),
            metrics(10000.0, 9500.0),
            metrics(10000.0, 9000.0),
            metrics(10000.0, 7500.0),
            metrics(10000.0, 5000.0),
        ]
        .iter()
        .map(|m| {
            let text = generate_advice(m, None);
            let lines: Vec<&str> = text.lines().collect();
            lines[lines.len() - 2].to_string()
        })
        .collect();

        for (i, a) in closings.iter().enumerate() {
            for b in closings.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_zero_income_never_prints_nan() {
        let text = generate_advice(&metrics(0.0, 0.0), None);
        assert!(!text.contains("NaN"));
        assert!(!text.contains("Rinf"));
        assert!(!text.contains("inf%"));
        assert!(text.contains("STATUS: NEEDS IMPROVEMENT"));
    }
}

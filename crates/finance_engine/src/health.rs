use models::{HealthInsights, HealthReport, HealthScore, HealthStatus, Metrics};

use crate::format::round2;

const BASE_SCORE: i32 = 50;

/// Additive 0-100 rubric over savings rate and income diversification.
pub fn compute_health_score(metrics: &Metrics, income_source_count: usize) -> HealthScore {
    let rate = metrics.savings_rate;
    let savings_points = if rate >= 30.0 {
        40
    } else if rate >= 20.0 {
        30
    } else if rate >= 10.0 {
        20
    } else if rate >= 0.0 {
        10
    } else {
        -20
    };

    let diversification_points = match income_source_count {
        0 | 1 => 0,
        2 => 5,
        _ => 10,
    };

    let score = (BASE_SCORE + savings_points + diversification_points).clamp(0, 100) as u8;

    HealthScore {
        score,
        status: status_for(score),
    }
}

pub fn status_for(score: u8) -> HealthStatus {
    if score >= 80 {
        HealthStatus::Excellent
    } else if score >= 60 {
        HealthStatus::Good
    } else if score >= 40 {
        HealthStatus::Fair
    } else {
        HealthStatus::NeedsImprovement
    }
}

pub fn build_health_report(metrics: Metrics) -> HealthReport {
    let income_source_count = metrics.income_items.len();
    let expense_count = metrics.actual_expense_count();
    let health = compute_health_score(&metrics, income_source_count);

    let monthly_balance = metrics.actual_monthly_savings;
    let average_expense = if expense_count > 0 {
        metrics.total_expenses / expense_count as f64
    } else {
        0.0
    };

    let insights = HealthInsights {
        monthly_balance: round2(monthly_balance),
        yearly_projection: round2(monthly_balance * 12.0),
        income_source_count,
        expense_count,
        average_expense: round2(average_expense),
        emergency_fund_target: round2(metrics.total_expenses * 6.0),
    };

    HealthReport {
        health_score: health.score,
        status: health.status,
        status_color: health.status.color().to_string(),
        metrics,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use models::{Category, LineItem};

    fn metrics_with_rate(rate: f64) -> Metrics {
        // income 1000, so expenses = 1000 - 10 * rate
        let expenses = 1000.0 - rate * 10.0;
        compute_metrics(&[LineItem::unnamed(1000.0)], &[LineItem::unnamed(expenses)])
    }

    #[test]
    fn test_savings_thresholds_are_inclusive() {
        assert_eq!(compute_health_score(&metrics_with_rate(30.0), 1).score, 90);
        assert_eq!(compute_health_score(&metrics_with_rate(20.0), 1).score, 80);
        assert_eq!(compute_health_score(&metrics_with_rate(10.0), 1).score, 70);
        assert_eq!(compute_health_score(&metrics_with_rate(0.0), 1).score, 60);
        assert_eq!(compute_health_score(&metrics_with_rate(9.9), 1).score, 60);
        assert_eq!(compute_health_score(&metrics_with_rate(-5.0), 1).score, 30);
    }

    #[test]
    fn test_income_diversification_bonus() {
        let m = metrics_with_rate(15.0);
        assert_eq!(compute_health_score(&m, 1).score, 70);
        assert_eq!(compute_health_score(&m, 2).score, 75);
        assert_eq!(compute_health_score(&m, 3).score, 80);
        assert_eq!(compute_health_score(&m, 7).score, 80);
    }

    #[test]
    fn test_score_stays_in_range() {
        let best = compute_health_score(&metrics_with_rate(90.0), 5);
        assert_eq!(best.score, 100);
        assert_eq!(best.status, HealthStatus::Excellent);

        let worst = compute_health_score(&metrics_with_rate(-300.0), 0);
        assert_eq!(worst.score, 30);
        assert_eq!(worst.status, HealthStatus::NeedsImprovement);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(100), HealthStatus::Excellent);
        assert_eq!(status_for(80), HealthStatus::Excellent);
        assert_eq!(status_for(79), HealthStatus::Good);
        assert_eq!(status_for(60), HealthStatus::Good);
        assert_eq!(status_for(59), HealthStatus::Fair);
        assert_eq!(status_for(40), HealthStatus::Fair);
        assert_eq!(status_for(39), HealthStatus::NeedsImprovement);
        assert_eq!(status_for(0), HealthStatus::NeedsImprovement);
    }

    #[test]
    fn test_health_report_insights() {
        let income = vec![
            LineItem::new("Pay", Category::Salary, 20000.0),
            LineItem::new("Flat", Category::Rental, 5000.0),
        ];
        let expenses = vec![
            LineItem::new("Rent", Category::Housing, 8000.0),
            LineItem::new("Food", Category::Food, 4000.0),
            LineItem::new("TFSA", Category::Savings, 3000.0),
        ];

        let report = build_health_report(compute_metrics(&income, &expenses));
        // savings rate 52% (+40), two income items (+5)
        assert_eq!(report.health_score, 95);
        assert_eq!(report.status, HealthStatus::Excellent);
        assert_eq!(report.status_color, "#10b981");
        assert_eq!(report.insights.monthly_balance, 13000.0);
        assert_eq!(report.insights.yearly_projection, 156000.0);
        assert_eq!(report.insights.income_source_count, 2);
        assert_eq!(report.insights.expense_count, 2);
        assert_eq!(report.insights.average_expense, 6000.0);
        assert_eq!(report.insights.emergency_fund_target, 72000.0);
    }
}

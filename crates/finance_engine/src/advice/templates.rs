use super::{AdviceContext, AdviceTier, RULE};
use crate::format::{fixed1, fixed2, grouped};

fn steps(out: &mut Vec<String>, items: &[&str]) {
    out.push(format!("\n{RULE}\nTHIS MONTH'S ACTION STEPS\n{RULE}\n"));
    for (i, item) in items.iter().enumerate() {
        out.push(format!("{}. {}", i + 1, item));
    }
}

fn closing(out: &mut Vec<String>, line: &str) {
    out.push(format!("\n{RULE}\n{line}"));
}

pub(super) fn critical(ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
    let deficit = fixed2(ctx.shortfall);

    out.push("1. Fix Budget Immediately".to_string());
    out.push(format!("   - Deficit: R{deficit}/month"));
    out.push("   - Track every expense for 7 days".to_string());
    out.push("   - Cut top 3 unnecessary expenses".to_string());
    out.push("   - Target: Reduce expenses to 80% of income\n".to_string());

    out.push("2. Increase Income".to_string());
    out.push("   - Negotiate salary increase".to_string());
    out.push("   - Start side hustle or freelancing".to_string());
    out.push(format!("   - Even R{deficit} extra would balance budget\n"));

    out.push("3. Manage Debt".to_string());
    out.push("   - List all debts with interest rates".to_string());
    out.push("   - Pay high-interest debt first".to_string());
    out.push("   - Avoid new debt - use cash/debit only".to_string());
    out.push("   - Consider debt counseling if needed".to_string());

    steps(
        out,
        &[
            "Install budgeting app (22seven, Budgets)",
            "List and categorize last month's expenses",
            "Cut top 3 unnecessary expenses",
            "Set up bank spending alerts",
        ],
    );
    closing(out, "Financial recovery starts with one decision. You can do this!");
}

pub(super) fn needs_improvement(ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
    let rate = AdviceTier::NeedsImprovement.target_rate().unwrap_or(10.0);
    let (target, need_more) = ctx.target_gap(rate);

    out.push("1. Boost Savings to 10%".to_string());
    out.push(format!("   - Current: R{} ({}%)", fixed2(ctx.monthly_savings), fixed1(ctx.savings_rate)));
    out.push(format!("   - Target: R{} (10%)", fixed2(target)));
    out.push(format!("   - Increase by: R{}/month", fixed2(need_more)));
    out.push("   - Automate savings on payday\n".to_string());

    out.push("2. Reduce Expenses".to_string());
    out.push("   - Cancel unused subscriptions (save R300-500)".to_string());
    out.push("   - Meal prep vs eating out (save R1500-2500)".to_string());
    out.push("   - Compare insurance quotes (save 10-15%)".to_string());
    out.push("   - Use prepaid services for control\n".to_string());

    out.push("3. Build Emergency Fund".to_string());
    out.push(format!("   - Target: R{} (6 months)", grouped(ctx.emergency_fund_target)));
    out.push("   - Keep in accessible savings account".to_string());
    out.push("   - Priority before other investments".to_string());

    steps(
        out,
        &[
            "Automate savings increase",
            "Open dedicated savings account",
            "Cancel 2 unused subscriptions",
            "Meal prep to cut food costs 20%",
        ],
    );
    closing(out, "Small, steady steps add up. Start with this month's payday!");
}

pub(super) fn healthy(ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
    let rate = AdviceTier::Healthy.target_rate().unwrap_or(20.0);
    let (target, need_more) = ctx.target_gap(rate);

    out.push("1. Push to 20% Savings Rate".to_string());
    out.push(format!("   - Current: {}% - You're doing well!", fixed1(ctx.savings_rate)));
    out.push(format!("   - Target: R{}/month", fixed2(target)));
    out.push(format!("   - Increase by: R{}", fixed2(need_more)));
    out.push("   - Reduce second-largest expense by 15%\n".to_string());

    out.push("2. Start Investing".to_string());
    out.push("   - Open Tax-Free Savings Account (TFSA)".to_string());
    out.push("   - Consider low-cost index ETFs".to_string());
    out.push("   - Start retirement annuity (RA) for tax benefits".to_string());
    out.push("   - Diversify: 70% growth, 30% bonds/cash\n".to_string());

    out.push("3. Complete Safety Net".to_string());
    out.push(format!("   - Build 6-month emergency fund: R{}", grouped(ctx.emergency_fund_target)));
    out.push("   - Review insurance (life, income, medical)".to_string());
    out.push("   - Create will and name beneficiaries".to_string());

    steps(
        out,
        &[
            "Raise your payday debit order towards 20%",
            "Open a TFSA and set a monthly contribution",
            "Cancel 2 unused subscriptions",
            "Track net worth monthly",
        ],
    );
    closing(out, "You're ahead of most people. Keep building momentum!");
}

pub(super) fn excellent(ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
    let rate = AdviceTier::Excellent.target_rate().unwrap_or(30.0);
    let (target, need_more) = ctx.target_gap(rate);

    out.push("1. Reach a 30% Savings Rate".to_string());
    out.push(format!("   - Current: {}% - strong performance", fixed1(ctx.savings_rate)));
    out.push(format!("   - Target: R{}/month", fixed2(target)));
    out.push(format!("   - Increase by: R{}", fixed2(need_more)));
    out.push("   - Direct every salary increase to savings\n".to_string());

    out.push("2. Grow Your Investments".to_string());
    out.push("   - Max out TFSA (R36k/year)".to_string());
    out.push(format!("   - Contribute to RA (up to R{}/month deductible)", fixed2(ctx.total_income * 0.275)));
    out.push(format!("   - Invest R{} in growth ETFs", fixed2(ctx.monthly_savings * 0.6)));
    out.push("   - Rebalance portfolio once a year\n".to_string());

    out.push("3. Protect Your Progress".to_string());
    out.push(format!("   - Keep 6-month emergency fund: R{}", grouped(ctx.emergency_fund_target)));
    out.push("   - Review insurance (life, income, medical)".to_string());
    out.push("   - Create will and name beneficiaries".to_string());

    steps(
        out,
        &[
            "Meet with financial advisor",
            "Open TFSA or investment account",
            "Update financial goals",
            "Track net worth monthly",
        ],
    );
    closing(out, "Strong discipline! Keep compounding your progress.");
}

pub(super) fn outstanding(ctx: &AdviceContext<'_>, out: &mut Vec<String>) {
    let savings = ctx.monthly_savings;

    out.push("1. Maximize Wealth Building".to_string());
    out.push(format!("   - Exceptional {}% savings rate!", fixed1(ctx.savings_rate)));
    out.push("   - Max out TFSA (R36k/year) + RA (27.5% income)".to_string());
    out.push(format!("   - Invest R{} in growth ETFs", fixed2(savings * 0.6)));
    out.push(format!("   - Allocate R{} to property/REITs", fixed2(savings * 0.3)));
    out.push("   - Financial independence possible in 15-20 years\n".to_string());

    out.push("2. Execute Strategic Goals".to_string());
    if let Some(goals) = ctx.goals {
        out.push(format!("   - Your goals: {goals}"));
    }
    out.push(format!("   - Annual savings power: R{}", grouped(savings * 12.0)));
    out.push("   - Build passive income streams".to_string());
    out.push("   - Consider property investment".to_string());
    out.push("   - Plan for early retirement options\n".to_string());

    out.push("3. Tax & Legacy Planning".to_string());
    out.push("   - Consult certified financial planner".to_string());
    out.push(format!("   - Maximize RA (save up to R{} in tax)", fixed2(ctx.total_income * 0.275)));
    out.push("   - Explore offshore investment (R1M/year)".to_string());
    out.push("   - Set up trust for estate planning".to_string());
    out.push("   - Review life insurance coverage".to_string());

    steps(
        out,
        &[
            "Meet with financial advisor",
            "Increase automatic investment contributions",
            "Review estate plan and beneficiaries",
            "Track net worth monthly",
        ],
    );
    closing(out, "Exceptional discipline! You're on track for financial freedom.");
}

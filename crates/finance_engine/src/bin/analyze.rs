use anyhow::{Context, Result};
use finance_engine::{build_health_report, compute_metrics, generate_advice, FinancialInput};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    logger::init("finance_engine=info");

    let input = env::args()
        .position(|a| a == "--input")
        .and_then(|i| env::args().nth(i + 1))
        .unwrap_or("budget.json".to_string());
    let input_path = PathBuf::from(&input);

    let raw = fs::read_to_string(&input_path)
        .with_context(|| format!("Reading {}", input_path.display()))?;
    let request: FinancialInput = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing {}", input_path.display()))?;
    let validated = request.validate().context("validate budget")?;

    let metrics = compute_metrics(&validated.income, &validated.expenses);
    let advice = generate_advice(&metrics, validated.goals.as_deref());
    let report = build_health_report(metrics);

    println!(
        "Health score: {} ({})\n",
        report.health_score, report.status
    );
    println!("{}", serde_json::to_string_pretty(&report.insights)?);
    println!();
    println!("{advice}");
    Ok(())
}

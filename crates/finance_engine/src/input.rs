use models::{Category, FlowKind, LineItem, LineItemInput};
use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Largest accepted total per kind. Keeps every derived figure (yearly
/// projection, emergency fund target, percentages) finite.
pub const MAX_TOTAL: f64 = 1e15;

/// Raw request payload shared by the analysis endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialInput {
    #[serde(default)]
    pub income: Option<Vec<LineItemInput>>,
    #[serde(default)]
    pub expenses: Option<Vec<LineItemInput>>,
    #[serde(default)]
    pub goals: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub income: Vec<LineItem>,
    pub expenses: Vec<LineItem>,
    pub goals: Option<String>,
}

impl FinancialInput {
    pub fn validate(self) -> Result<ValidatedInput> {
        let (Some(income), Some(expenses)) = (self.income, self.expenses) else {
            return Err(EngineError::MissingInput);
        };

        Ok(ValidatedInput {
            income: normalize_items(FlowKind::Income, &income)?,
            expenses: normalize_items(FlowKind::Expense, &expenses)?,
            goals: normalize_goals(self.goals),
        })
    }
}

/// Converts wire entries into structured line items.
///
/// Bare numbers become `Unnamed`/`Other` items. Objects keep their name and
/// category, falling back to the same defaults when either is missing.
pub fn normalize_items(kind: FlowKind, inputs: &[LineItemInput]) -> Result<Vec<LineItem>> {
    if inputs.is_empty() {
        return Err(EngineError::EmptyList(kind));
    }

    let items = inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| normalize_item(kind, idx + 1, input))
        .collect::<Result<Vec<_>>>()?;

    let total: f64 = items.iter().map(|item| item.amount).sum();
    if !total.is_finite() || total > MAX_TOTAL {
        return Err(EngineError::TotalOutOfRange(kind));
    }

    Ok(items)
}

fn normalize_item(kind: FlowKind, index: usize, input: &LineItemInput) -> Result<LineItem> {
    let amount = input.amount();
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::InvalidAmount {
            kind,
            index,
            amount,
        });
    }

    match input {
        LineItemInput::Amount(_) => Ok(LineItem::unnamed(amount)),
        LineItemInput::Item { name, category, .. } => {
            let category = match category.as_deref().map(str::trim) {
                None | Some("") => Category::Other,
                Some(raw) => Category::parse(raw)
                    .filter(|c| c.allowed_for(kind))
                    .ok_or_else(|| EngineError::UnknownCategory {
                        kind,
                        index,
                        category: raw.to_string(),
                    })?,
            };
            let name = name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(LineItem::UNNAMED);

            Ok(LineItem::new(name, category, amount))
        }
    }
}

pub fn normalize_goals(goals: Option<String>) -> Option<String> {
    goals
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, amount: f64) -> LineItemInput {
        LineItemInput::Item {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            amount,
        }
    }

    #[test]
    fn test_bare_numbers_become_unnamed_other() {
        let items = normalize_items(FlowKind::Income, &[LineItemInput::Amount(1500.0)]).unwrap();
        assert_eq!(items, vec![LineItem::new("Unnamed", Category::Other, 1500.0)]);
    }

    #[test]
    fn test_amount_only_object_gets_defaults() {
        let input = LineItemInput::Item {
            name: None,
            category: None,
            amount: 300.0,
        };
        let items = normalize_items(FlowKind::Expense, &[input]).unwrap();
        assert_eq!(items[0].name, "Unnamed");
        assert_eq!(items[0].category, Category::Other);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let err = normalize_items(FlowKind::Expense, &[item("Rent", "Housing", -1.0)]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount {
                kind: FlowKind::Expense,
                index: 1,
                amount: -1.0
            }
        );
    }

    #[test]
    fn test_category_must_match_kind() {
        let err = normalize_items(FlowKind::Income, &[item("Pay", "Salary", 10.0), item("Rent", "Housing", 5.0)])
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownCategory { index: 2, .. }));
        assert_eq!(err.to_string(), "income entry #2 has an unknown category 'Housing'");
    }

    #[test]
    fn test_missing_or_empty_lists_fail_validation() {
        let missing = FinancialInput {
            income: Some(vec![LineItemInput::Amount(1.0)]),
            expenses: None,
            goals: None,
        };
        assert_eq!(missing.validate().unwrap_err(), EngineError::MissingInput);

        let empty = FinancialInput {
            income: Some(vec![]),
            expenses: Some(vec![LineItemInput::Amount(1.0)]),
            goals: None,
        };
        assert_eq!(empty.validate().unwrap_err(), EngineError::EmptyList(FlowKind::Income));
    }

    #[test]
    fn test_oversized_totals_are_rejected() {
        let overflowing = FinancialInput {
            income: Some(vec![LineItemInput::Amount(1e308), LineItemInput::Amount(1e308)]),
            expenses: Some(vec![LineItemInput::Amount(0.0)]),
            goals: None,
        };
        assert_eq!(
            overflowing.validate().unwrap_err(),
            EngineError::TotalOutOfRange(FlowKind::Income)
        );

        let too_large = normalize_items(FlowKind::Expense, &[LineItemInput::Amount(1e307)]).unwrap_err();
        assert_eq!(too_large, EngineError::TotalOutOfRange(FlowKind::Expense));
        assert!(too_large.to_string().starts_with("expense total exceeds"));

        assert!(normalize_items(FlowKind::Income, &[LineItemInput::Amount(MAX_TOTAL)]).is_ok());
    }

    #[test]
    fn test_blank_goals_are_dropped() {
        assert_eq!(normalize_goals(Some("   ".to_string())), None);
        assert_eq!(normalize_goals(Some(" Buy a house ".to_string())), Some("Buy a house".to_string()));
    }
}

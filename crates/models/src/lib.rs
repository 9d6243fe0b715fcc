use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Line item models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
	Income,
	Expense,
}

impl FlowKind {
	pub fn label(self) -> &'static str {
		match self {
			FlowKind::Income => "income",
			FlowKind::Expense => "expense",
		}
	}
}

/// Closed set of categories. Each kind accepts its own subset plus `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	Salary,
	Freelance,
	Business,
	Investments,
	Rental,
	Housing,
	Food,
	Transportation,
	Healthcare,
	Entertainment,
	Utilities,
	Debt,
	Savings,
	Other,
}

impl Category {
	pub const INCOME: [Category; 6] = [
		Category::Salary,
		Category::Freelance,
		Category::Business,
		Category::Investments,
		Category::Rental,
		Category::Other,
	];

	pub const EXPENSE: [Category; 9] = [
		Category::Housing,
		Category::Food,
		Category::Transportation,
		Category::Healthcare,
		Category::Entertainment,
		Category::Utilities,
		Category::Debt,
		Category::Savings,
		Category::Other,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Salary => "Salary",
			Category::Freelance => "Freelance",
			Category::Business => "Business",
			Category::Investments => "Investments",
			Category::Rental => "Rental",
			Category::Housing => "Housing",
			Category::Food => "Food",
			Category::Transportation => "Transportation",
			Category::Healthcare => "Healthcare",
			Category::Entertainment => "Entertainment",
			Category::Utilities => "Utilities",
			Category::Debt => "Debt",
			Category::Savings => "Savings",
			Category::Other => "Other",
		}
	}

	pub fn allowed_for(self, kind: FlowKind) -> bool {
		match kind {
			FlowKind::Income => Self::INCOME.contains(&self),
			FlowKind::Expense => Self::EXPENSE.contains(&self),
		}
	}

	/// Case-insensitive lookup by display name.
	pub fn parse(raw: &str) -> Option<Category> {
		let raw = raw.trim();
		Self::INCOME
			.iter()
			.chain(Self::EXPENSE.iter())
			.copied()
			.find(|c| c.as_str().eq_ignore_ascii_case(raw))
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Wire shape of an entry: a bare amount or a structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineItemInput {
	Amount(f64),
	Item {
		#[serde(default)]
		name: Option<String>,
		#[serde(default)]
		category: Option<String>,
		amount: f64,
	},
}

impl LineItemInput {
	pub fn amount(&self) -> f64 {
		match self {
			LineItemInput::Amount(amount) => *amount,
			LineItemInput::Item { amount, .. } => *amount,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
	pub name: String,
	pub category: Category,
	pub amount: f64,
}

impl LineItem {
	pub const UNNAMED: &'static str = "Unnamed";

	pub fn new(name: impl Into<String>, category: Category, amount: f64) -> Self {
		Self {
			name: name.into(),
			category,
			amount,
		}
	}

	/// Legacy bare-number entry.
	pub fn unnamed(amount: f64) -> Self {
		Self::new(Self::UNNAMED, Category::Other, amount)
	}
}

// Derived models
pub type CategoryTotals = IndexMap<Category, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
	pub total_income: f64,
	pub total_expenses: f64,
	pub total_savings: f64,
	pub leftover_money: f64,
	pub actual_monthly_savings: f64,
	pub savings_rate: f64,
	pub overspending: bool,
	pub income_by_category: CategoryTotals,
	pub expenses_by_category: CategoryTotals,
	pub savings_by_category: CategoryTotals,
	pub income_items: Vec<LineItem>,
	pub expense_items: Vec<LineItem>,
	pub savings_items: Vec<LineItem>,
}

impl Metrics {
	/// Expense items that are not tagged as savings.
	pub fn actual_expense_count(&self) -> usize {
		self.expense_items.len() - self.savings_items.len()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
	Excellent,
	Good,
	Fair,
	#[serde(rename = "Needs Improvement")]
	NeedsImprovement,
}

impl HealthStatus {
	pub fn label(self) -> &'static str {
		match self {
			HealthStatus::Excellent => "Excellent",
			HealthStatus::Good => "Good",
			HealthStatus::Fair => "Fair",
			HealthStatus::NeedsImprovement => "Needs Improvement",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			HealthStatus::Excellent => "#10b981",
			HealthStatus::Good => "#3b82f6",
			HealthStatus::Fair => "#f59e0b",
			HealthStatus::NeedsImprovement => "#ef4444",
		}
	}
}

impl fmt::Display for HealthStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
	pub score: u8,
	pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
	pub monthly_balance: f64,
	pub yearly_projection: f64,
	pub income_source_count: usize,
	pub expense_count: usize,
	pub average_expense: f64,
	pub emergency_fund_target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
	pub health_score: u8,
	pub status: HealthStatus,
	pub status_color: String,
	pub metrics: Metrics,
	pub insights: HealthInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
	pub total_income: f64,
	pub total_expenses: f64,
	pub balance: f64,
}

// Persisted models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: String,
	pub name: String,
	pub email: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResult {
	pub user_id: String,
	pub user_name: Option<String>,
	pub income: Vec<LineItem>,
	pub expenses: Vec<LineItem>,
	pub goals: Option<String>,
	pub metrics: Metrics,
	pub ai_advice: String,
	pub health_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
	pub id: String,
	pub user_id: String,
	#[serde(default)]
	pub user_name: Option<String>,
	pub date: DateTime<Utc>,
	pub income: Vec<LineItem>,
	pub expenses: Vec<LineItem>,
	#[serde(default)]
	pub goals: Option<String>,
	pub metrics: Metrics,
	pub ai_advice: String,
	#[serde(default)]
	pub health_score: Option<u8>,
}

// Settings models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
	Gemini,
	HuggingFace,
	Ollama,
}

impl FromStr for ProviderKind {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"gemini" => Ok(ProviderKind::Gemini),
			"huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
			"ollama" => Ok(ProviderKind::Ollama),
			other => Err(format!("unknown AI provider '{other}'")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
	pub data_dir: String,
}

impl Default for StorageSettings {
	fn default() -> Self {
		Self {
			data_dir: "data".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
	pub provider: ProviderKind,
	pub model: Option<String>,
	pub api_url: Option<String>,
	pub ollama_base_url: Option<String>,
	pub timeout_secs: u64,
}

impl Default for AiSettings {
	fn default() -> Self {
		Self {
			provider: ProviderKind::Gemini,
			model: None,
			api_url: None,
			ollama_base_url: None,
			timeout_secs: 30,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub storage: StorageSettings,
	pub ai: AiSettings,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_category_membership() {
		assert!(Category::Salary.allowed_for(FlowKind::Income));
		assert!(!Category::Salary.allowed_for(FlowKind::Expense));
		assert!(Category::Savings.allowed_for(FlowKind::Expense));
		assert!(!Category::Savings.allowed_for(FlowKind::Income));
		assert!(Category::Other.allowed_for(FlowKind::Income));
		assert!(Category::Other.allowed_for(FlowKind::Expense));
	}

	#[test]
	fn test_category_parse_is_case_insensitive() {
		assert_eq!(Category::parse("housing"), Some(Category::Housing));
		assert_eq!(Category::parse(" Savings "), Some(Category::Savings));
		assert_eq!(Category::parse("Crypto"), None);
	}

	#[test]
	fn test_line_item_input_accepts_number_or_object() {
		let inputs: Vec<LineItemInput> =
			serde_json::from_str(r#"[1000, {"amount": 250.5}, {"name": "Rent", "category": "Housing", "amount": 8000}]"#)
				.unwrap();

		assert_eq!(inputs[0], LineItemInput::Amount(1000.0));
		assert_eq!(inputs[1].amount(), 250.5);
		match &inputs[2] {
			LineItemInput::Item { name, category, .. } => {
				assert_eq!(name.as_deref(), Some("Rent"));
				assert_eq!(category.as_deref(), Some("Housing"));
			}
			other => panic!("unexpected shape: {:?}", other),
		}
	}

	#[test]
	fn test_health_status_serializes_with_space() {
		let json = serde_json::to_string(&HealthStatus::NeedsImprovement).unwrap();
		assert_eq!(json, "\"Needs Improvement\"");
	}

	#[test]
	fn test_settings_defaults_fill_missing_sections() {
		let settings: Settings = serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();
		assert_eq!(settings.server.port, 8080);
		assert_eq!(settings.server.host, "127.0.0.1");
		assert_eq!(settings.storage.data_dir, "data");
		assert_eq!(settings.ai.provider, ProviderKind::Gemini);
		assert_eq!(settings.ai.timeout_secs, 30);
	}

	#[test]
	fn test_provider_kind_from_str() {
		assert_eq!("Gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
		assert_eq!("hf".parse::<ProviderKind>(), Ok(ProviderKind::HuggingFace));
		assert!("openai".parse::<ProviderKind>().is_err());
	}
}

//! # Finance Engine
//!
//! Pure budget computations behind the coach API: line-item normalization,
//! budget metrics, the health score, the rule-based advice report and the
//! prompt handed to an external advisor. The library itself performs no I/O.

pub mod advice;
pub mod error;
pub mod format;
pub mod health;
pub mod input;
pub mod metrics;
pub mod prompt;

pub use advice::{generate_advice, AdviceContext, AdviceTier};
pub use error::{EngineError, Result};
pub use health::{build_health_report, compute_health_score, status_for};
pub use input::{normalize_items, FinancialInput, ValidatedInput};
pub use metrics::{compute_metrics, compute_summary, group_by_category};
pub use prompt::{build_advisor_prompt, build_chat_prompt};

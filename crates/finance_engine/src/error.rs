use models::FlowKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Input problems detected before any metric is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Income and expenses are required")]
    MissingInput,

    #[error("At least one {} entry is required", .0.label())]
    EmptyList(FlowKind),

    #[error("{} entry #{index} has an invalid amount: {amount}", .kind.label())]
    InvalidAmount {
        kind: FlowKind,
        index: usize,
        amount: f64,
    },

    #[error("{} total exceeds the supported maximum of {}", .0.label(), crate::input::MAX_TOTAL)]
    TotalOutOfRange(FlowKind),

    #[error("{} entry #{index} has an unknown category '{category}'", .kind.label())]
    UnknownCategory {
        kind: FlowKind,
        index: usize,
        category: String,
    },
}

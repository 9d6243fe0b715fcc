pub mod orchestrator;

// Re export the important bits
pub use orchestrator::{Advice, AdviceOrchestrator, AdviceSource, ChatError};

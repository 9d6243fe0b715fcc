use ai::AdviceOrchestrator;
use std::sync::Arc;

use crate::repository::ResultRepository;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ResultRepository>,
    pub advisor: Arc<AdviceOrchestrator>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ResultRepository>, advisor: AdviceOrchestrator) -> Self {
        Self {
            repo,
            advisor: Arc::new(advisor),
        }
    }
}

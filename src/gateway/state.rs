use std::sync::Arc;

use crate::orchestrator::Orchestrator;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct HandlerState {
    pub orchestrator: Arc<Orchestrator>,
}

impl HandlerState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

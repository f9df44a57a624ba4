//! Shared application state passed to all Axum handlers.

use std::sync::Arc;

use crate::flows::capabilities::AiCapabilities;
use crate::flows::orchestrator::Orchestrator;
use crate::session::SessionStore;

/// Cheap to clone; Axum clones it per request. The store and the
/// orchestrator share the same underlying session map.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(capabilities: Arc<dyn AiCapabilities>) -> Self {
        let sessions = SessionStore::default();
        let orchestrator = Orchestrator::new(sessions.clone(), capabilities);
        Self {
            sessions,
            orchestrator,
        }
    }
}

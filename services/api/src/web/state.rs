//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use lesson_forge_core::orchestrator::GenerationOrchestrator;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Each request is otherwise stateless; the orchestrator holds the only
/// process-wide decision (whether a provider is configured).
pub struct AppState {
    pub orchestrator: GenerationOrchestrator,
    pub config: Arc<Config>,
}

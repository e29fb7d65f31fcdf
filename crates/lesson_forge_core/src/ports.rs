//! crates/lesson_forge_core/src/ports.rs
//!
//! Defines the service contract (trait) for the external generation
//! provider. This trait forms the boundary of the hexagonal architecture,
//! keeping the core independent of any specific provider client.

use async_trait::async_trait;

use crate::domain::{GenerationRequest, LessonPackage};

/// A failure of the external generation provider.
///
/// None of these variants ever reach the HTTP caller; the orchestrator
/// absorbs them all and answers with the template fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// No credential is configured, so no call was attempted.
    #[error("Generation provider is not configured")]
    Unavailable,
    /// The network call failed or the provider answered with an error.
    #[error("Generation provider transport failure: {0}")]
    Transport(String),
    /// The provider answered, but the body does not parse as a lesson package.
    #[error("Generation provider returned an unparseable response: {0}")]
    Parse(String),
    /// Anything else unexpected.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// The outbound port to a hosted text-generation provider.
#[async_trait]
pub trait LessonGenerationService: Send + Sync {
    /// Generates a complete lesson package for a validated request.
    async fn generate_package(&self, request: &GenerationRequest) -> PortResult<LessonPackage>;
}

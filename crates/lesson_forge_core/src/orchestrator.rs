//! crates/lesson_forge_core/src/orchestrator.rs
//!
//! Decides between live generation and the template fallback. The
//! orchestrator makes at most one provider attempt per request and
//! guarantees a package is always produced: provider failures are
//! absorbed here and never surfaced to the caller.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{GenerationRequest, LessonPackage};
use crate::fallback::build_fallback;
use crate::ports::LessonGenerationService;

/// How a package was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationSource {
    Live,
    Fallback,
}

/// A produced package tagged with its source, so the HTTP layer can map
/// both outcomes to the same success response without exception plumbing.
#[derive(Debug)]
pub struct GeneratedPackage {
    pub package: LessonPackage,
    pub source: GenerationSource,
}

/// Orchestrates one generation attempt with a guaranteed fallback.
///
/// Provider availability is decided at construction: `provider` is `None`
/// when no credential is configured, in which case no network call is
/// ever attempted.
pub struct GenerationOrchestrator {
    provider: Option<Arc<dyn LessonGenerationService>>,
}

impl GenerationOrchestrator {
    pub fn new(provider: Option<Arc<dyn LessonGenerationService>>) -> Self {
        Self { provider }
    }

    /// Produces a lesson package for a validated request.
    ///
    /// Total: exactly one provider attempt when a provider is configured,
    /// and the template fallback on any failure.
    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedPackage {
        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                info!("No generation provider configured; using template fallback");
                return GeneratedPackage {
                    package: build_fallback(request),
                    source: GenerationSource::Fallback,
                };
            }
        };

        match provider.generate_package(request).await {
            Ok(package) => GeneratedPackage {
                package,
                source: GenerationSource::Live,
            },
            Err(error) => {
                warn!("Live generation failed, using template fallback: {error}");
                GeneratedPackage {
                    package: build_fallback(request),
                    source: GenerationSource::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FALLBACK_MODEL_ID;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request() -> GenerationRequest {
        GenerationRequest {
            subject: "Math".to_string(),
            topic: "Fractions".to_string(),
            grade_level: "4th grade".to_string(),
            learning_objectives: "Compare fractions.".to_string(),
            duration: None,
            assessment_type: None,
            tone: None,
            focus_skills: None,
            include_aids: true,
        }
    }

    /// A provider stub that counts calls and answers with a fixed result.
    struct StubProvider {
        calls: AtomicUsize,
        error: Option<fn() -> PortError>,
    }

    impl StubProvider {
        fn failing(error: fn() -> PortError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                error: Some(error),
            }
        }

        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                error: None,
            }
        }
    }

    #[async_trait]
    impl LessonGenerationService for StubProvider {
        async fn generate_package(
            &self,
            request: &GenerationRequest,
        ) -> PortResult<LessonPackage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make_error) => Err(make_error()),
                None => {
                    let mut package = build_fallback(request);
                    package.metadata.model = "stub-live-model".to_string();
                    Ok(package)
                }
            }
        }
    }

    #[tokio::test]
    async fn no_provider_means_fallback_without_any_call() {
        let orchestrator = GenerationOrchestrator::new(None);
        let result = orchestrator.generate(&request()).await;
        assert_eq!(result.source, GenerationSource::Fallback);
        assert_eq!(result.package.metadata.model, FALLBACK_MODEL_ID);
    }

    #[tokio::test]
    async fn successful_provider_result_is_returned_as_live() {
        let provider = Arc::new(StubProvider::succeeding());
        let orchestrator = GenerationOrchestrator::new(Some(provider.clone()));
        let result = orchestrator.generate(&request()).await;
        assert_eq!(result.source, GenerationSource::Live);
        assert_eq!(result.package.metadata.model, "stub-live-model");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_falls_back_without_retry() {
        let provider = Arc::new(StubProvider::failing(|| {
            PortError::Transport("connection refused".to_string())
        }));
        let orchestrator = GenerationOrchestrator::new(Some(provider.clone()));
        let result = orchestrator.generate(&request()).await;
        assert_eq!(result.source, GenerationSource::Fallback);
        assert_eq!(result.package.metadata.model, FALLBACK_MODEL_ID);
        // Exactly one attempt, no retry loop.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn parse_failure_falls_back_identically() {
        let provider = Arc::new(StubProvider::failing(|| {
            PortError::Parse("missing field `quiz`".to_string())
        }));
        let orchestrator = GenerationOrchestrator::new(Some(provider));
        let result = orchestrator.generate(&request()).await;
        assert_eq!(result.source, GenerationSource::Fallback);
    }
}

pub mod domain;
pub mod fallback;
pub mod orchestrator;
pub mod ports;
pub mod prompt;
pub mod validate;

pub use domain::{
    GenerationRequest, LessonPackage, DEFAULT_DURATION, DEFAULT_TONE, FALLBACK_MODEL_ID,
};
pub use fallback::build_fallback;
pub use orchestrator::{GeneratedPackage, GenerationOrchestrator, GenerationSource};
pub use ports::{LessonGenerationService, PortError, PortResult};
pub use prompt::build_prompt;
pub use validate::{validate_request, FieldViolation, ValidationError};

//! crates/lesson_forge_core/src/validate.rs
//!
//! Validates an arbitrary JSON body against the `GenerationRequest` schema.
//! Every violation is collected before failing, so the caller can report
//! all problems in one response. Downstream builders rely on this running
//! first and never re-validate.

use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::GenerationRequest;

/// A single field-level schema violation.
#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// The request failed schema validation. Carries one entry per violated field.
#[derive(Debug, thiserror::Error)]
#[error("Request validation failed: {} field(s) invalid", violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// True when one of the violations names the given field.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Validates a raw JSON body and produces a `GenerationRequest`.
///
/// Required fields must be strings that are non-empty after trimming.
/// Optional fields, when present, must hold the declared type; a type
/// mismatch is a violation, never a coercion.
pub fn validate_request(body: &Value) -> Result<GenerationRequest, ValidationError> {
    let mut violations = Vec::new();

    let subject = required_text(body, "subject", &mut violations);
    let topic = required_text(body, "topic", &mut violations);
    let grade_level = required_text(body, "gradeLevel", &mut violations);
    let learning_objectives = required_text(body, "learningObjectives", &mut violations);

    let duration = optional_text(body, "duration", &mut violations);
    let assessment_type = optional_text(body, "assessmentType", &mut violations);
    let tone = optional_text(body, "tone", &mut violations);
    let focus_skills = optional_text(body, "focusSkills", &mut violations);

    let include_aids = match body.get("includeAids") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            violations.push(FieldViolation {
                field: "includeAids".to_string(),
                message: "must be a boolean".to_string(),
            });
            true
        }
    };

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    // All four required fields produced Some(..) because no violation was recorded.
    Ok(GenerationRequest {
        subject: subject.unwrap_or_default(),
        topic: topic.unwrap_or_default(),
        grade_level: grade_level.unwrap_or_default(),
        learning_objectives: learning_objectives.unwrap_or_default(),
        duration,
        assessment_type,
        tone,
        focus_skills,
        include_aids,
    })
}

/// Extracts a required string field, recording a violation when it is
/// missing, not a string, or empty after trimming.
fn required_text(body: &Value, field: &str, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "is required and must be non-empty text".to_string(),
            });
            None
        }
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                violations.push(FieldViolation {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
                None
            } else {
                Some(text.clone())
            }
        }
        Some(_) => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "must be text".to_string(),
            });
            None
        }
    }
}

/// Extracts an optional string field, recording a violation on a type
/// mismatch. Blank strings are treated as absent so defaults apply.
fn optional_text(body: &Value, field: &str, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "must be text when provided".to_string(),
            });
            None
        }
    }
}

//! crates/lesson_forge_core/src/domain.rs
//!
//! Defines the core data structures for the application: the validated
//! generation request and the lesson package returned to the caller.
//! All wire types serialize with camelCase field names to match the
//! published JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Duration used when the request leaves the field blank.
pub const DEFAULT_DURATION: &str = "45 minutes";

/// Tone used when the request leaves the field blank.
pub const DEFAULT_TONE: &str = "encouraging and supportive";

/// Model identifier stamped on packages built by the template fallback.
/// Distinct from any live model name so callers can tell the two apart.
pub const FALLBACK_MODEL_ID: &str = "template-fallback-v1";

/// A teacher's lesson-generation request, immutable once validated.
///
/// The required fields are guaranteed non-empty after validation; optional
/// fields are substituted with the named defaults at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub subject: String,
    pub topic: String,
    pub grade_level: String,
    /// Newline-delimited list of objectives, as typed by the teacher.
    pub learning_objectives: String,
    pub duration: Option<String>,
    pub assessment_type: Option<String>,
    pub tone: Option<String>,
    pub focus_skills: Option<String>,
    #[serde(default = "default_include_aids")]
    pub include_aids: bool,
}

fn default_include_aids() -> bool {
    true
}

impl GenerationRequest {
    /// The lesson duration, falling back to [`DEFAULT_DURATION`].
    pub fn duration_or_default(&self) -> &str {
        self.duration.as_deref().unwrap_or(DEFAULT_DURATION)
    }

    /// The requested tone, falling back to [`DEFAULT_TONE`].
    pub fn tone_or_default(&self) -> &str {
        self.tone.as_deref().unwrap_or(DEFAULT_TONE)
    }
}

/// Splits a newline-delimited objectives string into a clean list.
///
/// Both the prompt builder and the fallback builder use this exact
/// splitting so the two generation paths agree on the objective list.
pub fn split_objectives(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

//=========================================================================================
// Lesson Package (the response aggregate)
//=========================================================================================

/// The complete structured output handed back to the caller.
///
/// Constructed once per request and never mutated. `teaching_aids` is
/// omitted from the serialized form entirely when not requested.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPackage {
    pub lesson_plan: LessonPlan,
    pub quiz: Quiz,
    pub student_notes: StudentNotes,
    pub feedback_report: FeedbackReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaching_aids: Option<Vec<TeachingAid>>,
    pub metadata: PackageMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    pub title: String,
    pub grade_level: String,
    pub subject: String,
    pub topic: String,
    pub duration: String,
    pub overview: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub standards: Vec<String>,
    pub segments: Vec<LessonSegment>,
    pub differentiation: Vec<Differentiation>,
    pub materials: Vec<String>,
    pub homework: String,
    pub assessment: String,
}

/// One timed block of the lesson.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonSegment {
    pub label: String,
    pub purpose: String,
    pub steps: Vec<String>,
    pub timing: String,
}

/// Adaptations for one audience of learners.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Differentiation {
    pub audience: String,
    pub adaptations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub format: String,
    pub questions: Vec<QuizQuestion>,
}

/// A single quiz question. `options` is empty for open-response questions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentNotes {
    pub summary: String,
    pub vocabulary: Vec<VocabularyEntry>,
    pub study_tips: Vec<String>,
    pub real_world_connections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub teacher_summary: String,
    pub strengths: Vec<String>,
    pub next_steps: Vec<String>,
    pub parent_note: String,
}

/// A prompt the teacher can feed to an image or slide generator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeachingAid {
    pub title: String,
    pub prompt: String,
    pub usage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub tone: String,
}

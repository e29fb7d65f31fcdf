//! services/api/src/adapters/generation_llm.rs
//!
//! This module contains the adapter for the lesson-generating LLM.
//! It implements the `LessonGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use lesson_forge_core::{
    domain::{GenerationRequest, LessonPackage},
    ports::{LessonGenerationService, PortError, PortResult},
    prompt::build_prompt,
};

const SYSTEM_INSTRUCTIONS: &str = "You are an experienced curriculum designer. \
You respond with a single JSON object and nothing else: no markdown, no code \
fences, no commentary. The JSON must match the shape given in the user message \
exactly.";

/// Cap on the generated output length.
const MAX_COMPLETION_TOKENS: u32 = 4096;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `LessonGenerationService` using an
/// OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiGenerationAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerationAdapter {
    /// Creates a new `OpenAiGenerationAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

/// Removes a surrounding markdown code fence, if present.
///
/// Models sometimes wrap the JSON in ```json ... ``` despite instructions;
/// the inner text is what gets parsed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the optional language tag on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

//=========================================================================================
// `LessonGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LessonGenerationService for OpenAiGenerationAdapter {
    /// Generates a lesson package by prompting the LLM and parsing its reply.
    async fn generate_package(&self, request: &GenerationRequest) -> PortResult<LessonPackage> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_prompt(request))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.7)
            .top_p(0.95)
            .max_completion_tokens(MAX_COMPLETION_TOKENS)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e: OpenAIError| PortError::Transport(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Parse("Generation LLM response contained no text content.".to_string())
            })?;

        serde_json::from_str::<LessonPackage>(strip_code_fence(&content))
            .map_err(|e| PortError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_passes_through_untouched() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn json_fence_with_language_tag_is_removed() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn plain_fence_is_removed() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let fenced = "  ```json\n{\"a\": 1}\n```  ";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn fenced_package_parses_after_stripping() {
        let body = r#"```json
{
  "lessonPlan": {
    "title": "t", "gradeLevel": "g", "subject": "s", "topic": "x",
    "duration": "45 minutes", "overview": ["a", "b", "c"],
    "learningObjectives": ["o1"], "standards": ["s1", "s2", "s3"],
    "segments": [], "differentiation": [], "materials": ["m1", "m2", "m3"],
    "homework": "h", "assessment": "a"
  },
  "quiz": { "title": "q", "format": "mixed", "questions": [] },
  "studentNotes": {
    "summary": "sum", "vocabulary": [], "studyTips": ["t1", "t2", "t3"],
    "realWorldConnections": ["r1", "r2", "r3"]
  },
  "feedbackReport": {
    "teacherSummary": "ts", "strengths": ["s"], "nextSteps": ["n"], "parentNote": "p"
  },
  "metadata": { "generatedAt": "2026-01-01T00:00:00Z", "model": "m", "tone": "warm" }
}
```"#;
        let package: LessonPackage = serde_json::from_str(strip_code_fence(body)).unwrap();
        assert!(package.teaching_aids.is_none());
        assert_eq!(package.metadata.model, "m");
    }
}

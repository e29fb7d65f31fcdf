//! crates/lesson_forge_core/src/prompt.rs
//!
//! Builds the single text instruction sent to the text-generation provider.
//! The instruction embeds the full output shape and the domain rules so the
//! provider returns JSON that parses directly into a `LessonPackage`.

use crate::domain::{split_objectives, GenerationRequest};

/// The required output shape, embedded literally in every prompt so the
/// provider's response parses into `LessonPackage` without post-processing.
const OUTPUT_SHAPE: &str = r#"{
  "lessonPlan": {
    "title": "string",
    "gradeLevel": "string",
    "subject": "string",
    "topic": "string",
    "duration": "string",
    "overview": ["string", "..."],
    "learningObjectives": ["string", "..."],
    "standards": ["string", "..."],
    "segments": [
      { "label": "string", "purpose": "string", "steps": ["string", "..."], "timing": "string" }
    ],
    "differentiation": [
      { "audience": "string", "adaptations": ["string", "..."] }
    ],
    "materials": ["string", "..."],
    "homework": "string",
    "assessment": "string"
  },
  "quiz": {
    "title": "string",
    "format": "string",
    "questions": [
      { "question": "string", "options": ["string", "..."], "answer": "string", "explanation": "string" }
    ]
  },
  "studentNotes": {
    "summary": "string",
    "vocabulary": [ { "term": "string", "definition": "string" } ],
    "studyTips": ["string", "..."],
    "realWorldConnections": ["string", "..."]
  },
  "feedbackReport": {
    "teacherSummary": "string",
    "strengths": ["string", "..."],
    "nextSteps": ["string", "..."],
    "parentNote": "string"
  },
  "teachingAids": [ { "title": "string", "prompt": "string", "usage": "string" } ],
  "metadata": { "generatedAt": "ISO-8601 string", "model": "string", "tone": "string" }
}"#;

/// The domain rules the generated package must satisfy.
const DOMAIN_RULES: &str = r#"1. Use language appropriate for the stated grade level throughout.
2. Lesson segments must cover: introduction, main instruction, guided practice, independent practice, differentiation, assessment, and reflection.
3. The quiz must contain EXACTLY 5 questions of varied types (multiple choice, short answer, open response). Use an empty "options" array for open-response questions.
4. Differentiation must cover at least two distinct audiences, including lower-attaining and higher-attaining learners.
5. Include at least 3 study tips.
6. Every list field must contain at least 3 items unless the content is inherently short.
7. Output PURE JSON matching the shape above. No markdown, no code fences, no commentary before or after the JSON."#;

/// Builds the generation instruction for a validated request.
///
/// Deterministic: the same request always yields the same text. Objectives
/// are split, trimmed, and numbered from 1; absent optional fields are
/// replaced with their named defaults.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let objectives = split_objectives(&request.learning_objectives)
        .iter()
        .enumerate()
        .map(|(index, objective)| format!("{}. {}", index + 1, objective))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "Create a complete lesson package for the following class.\n\n\
         Subject: {}\n\
         Topic: {}\n\
         Grade level: {}\n\
         Lesson duration: {}\n\
         Tone: {}\n",
        request.subject,
        request.topic,
        request.grade_level,
        request.duration_or_default(),
        request.tone_or_default(),
    );

    if let Some(assessment_type) = &request.assessment_type {
        prompt.push_str(&format!("Preferred assessment type: {}\n", assessment_type));
    }
    if let Some(focus_skills) = &request.focus_skills {
        prompt.push_str(&format!("Skills to emphasize: {}\n", focus_skills));
    }

    prompt.push_str(&format!("\nLearning objectives:\n{}\n", objectives));

    if request.include_aids {
        prompt.push_str(
            "\nInclude a \"teachingAids\" array with visual-aid prompts the teacher can use.\n",
        );
    } else {
        prompt.push_str("\nOmit the \"teachingAids\" field entirely.\n");
    }

    prompt.push_str(&format!(
        "\nReturn a single JSON object with exactly this shape:\n{}\n\nRules:\n{}\n",
        OUTPUT_SHAPE, DOMAIN_RULES,
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_DURATION, DEFAULT_TONE};

    fn request() -> GenerationRequest {
        GenerationRequest {
            subject: "History".to_string(),
            topic: "The Silk Road".to_string(),
            grade_level: "7th grade".to_string(),
            learning_objectives: "Explain X.\n\nApply X.\n".to_string(),
            duration: None,
            assessment_type: None,
            tone: None,
            focus_skills: None,
            include_aids: true,
        }
    }

    #[test]
    fn objectives_are_numbered_from_one_with_blanks_dropped() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("1. Explain X."));
        assert!(prompt.contains("2. Apply X."));
        assert!(!prompt.contains("3. "));
    }

    #[test]
    fn absent_optionals_use_the_named_defaults() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains(DEFAULT_DURATION));
        assert!(prompt.contains(DEFAULT_TONE));
    }

    #[test]
    fn prompt_embeds_output_shape_and_rules() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("\"lessonPlan\""));
        assert!(prompt.contains("\"feedbackReport\""));
        assert!(prompt.contains("EXACTLY 5 questions"));
        assert!(prompt.contains("lower-attaining and higher-attaining"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let request = request();
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn aids_opt_out_is_stated_explicitly() {
        let mut opted_out = request();
        opted_out.include_aids = false;
        let prompt = build_prompt(&opted_out);
        assert!(prompt.contains("Omit the \"teachingAids\" field"));
    }
}

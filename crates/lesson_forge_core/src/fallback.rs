//! crates/lesson_forge_core/src/fallback.rs
//!
//! Builds a complete lesson package from templated text, with no external
//! call. This is both the offline mode and the recovery path when the
//! provider fails, so it must succeed for every validated request.

use chrono::Utc;

use crate::domain::{
    split_objectives, Differentiation, FeedbackReport, GenerationRequest, LessonPackage,
    LessonPlan, LessonSegment, PackageMetadata, Quiz, QuizQuestion, StudentNotes, TeachingAid,
    VocabularyEntry, FALLBACK_MODEL_ID,
};

/// Builds a schema-complete lesson package for a validated request.
///
/// Total over the validated domain: never fails. The wording is template
/// content; the structure (counts, field presence, ordering) is the
/// contract callers and tests rely on.
pub fn build_fallback(request: &GenerationRequest) -> LessonPackage {
    let topic = &request.topic;
    let subject = &request.subject;
    let grade = &request.grade_level;

    LessonPackage {
        lesson_plan: build_lesson_plan(request),
        quiz: build_quiz(topic, subject),
        student_notes: build_student_notes(topic, subject, grade),
        feedback_report: build_feedback_report(topic, subject, grade),
        teaching_aids: build_teaching_aids(request),
        metadata: PackageMetadata {
            generated_at: Utc::now(),
            model: FALLBACK_MODEL_ID.to_string(),
            tone: request.tone_or_default().to_string(),
        },
    }
}

fn build_lesson_plan(request: &GenerationRequest) -> LessonPlan {
    let topic = &request.topic;
    let subject = &request.subject;
    let grade = &request.grade_level;

    LessonPlan {
        title: format!("Exploring {topic}"),
        grade_level: grade.clone(),
        subject: subject.clone(),
        topic: topic.clone(),
        duration: request.duration_or_default().to_string(),
        overview: vec![
            format!("This {subject} lesson introduces {grade} students to {topic}."),
            format!("Students move from a shared hook activity to guided and independent work on {topic}."),
            format!("The lesson closes with a short assessment and a reflection on what was learned about {topic}."),
        ],
        learning_objectives: split_objectives(&request.learning_objectives),
        standards: vec![
            format!("Demonstrate understanding of the key ideas of {topic}."),
            format!("Communicate reasoning about {topic} using subject-appropriate vocabulary."),
            format!("Apply concepts from {topic} to unfamiliar problems and contexts."),
        ],
        segments: build_segments(topic),
        differentiation: vec![
            Differentiation {
                audience: "Students needing additional support".to_string(),
                adaptations: vec![
                    format!("Provide a partially completed organizer for the {topic} activities."),
                    "Pair students with a supportive peer during guided practice.".to_string(),
                    "Reduce the number of independent practice items and allow extra time.".to_string(),
                ],
            },
            Differentiation {
                audience: "Students ready for a challenge".to_string(),
                adaptations: vec![
                    format!("Offer an extension question that applies {topic} to a new scenario."),
                    "Invite students to design their own practice problem and solution key.".to_string(),
                    "Ask students to explain their reasoning in writing using precise vocabulary.".to_string(),
                ],
            },
        ],
        materials: vec![
            "Whiteboard or projector".to_string(),
            format!("Printed {topic} practice sheets"),
            "Notebooks and writing materials".to_string(),
            "Exit tickets".to_string(),
        ],
        homework: format!(
            "Complete the short practice sheet on {topic} and write two sentences \
             describing one thing you found interesting and one question you still have."
        ),
        assessment: request
            .assessment_type
            .clone()
            .unwrap_or_else(|| {
                format!(
                    "Exit ticket with three quick questions on {topic}, reviewed \
                     alongside observations from guided practice."
                )
            }),
    }
}

/// Five fixed segments whose timings sum to the standard lesson block.
fn build_segments(topic: &str) -> Vec<LessonSegment> {
    vec![
        LessonSegment {
            label: "Introduction & Hook".to_string(),
            purpose: format!("Spark curiosity and surface what students already know about {topic}."),
            steps: vec![
                format!("Show a real-world image or question connected to {topic}."),
                "Collect student predictions and prior knowledge on the board.".to_string(),
                "Share today's objectives in student-friendly language.".to_string(),
            ],
            timing: "5 minutes".to_string(),
        },
        LessonSegment {
            label: "Direct Instruction".to_string(),
            purpose: format!("Teach the core concepts of {topic} with worked examples."),
            steps: vec![
                format!("Present the key ideas of {topic} step by step."),
                "Model one worked example, thinking aloud at each step.".to_string(),
                "Check understanding with quick hand signals or mini-whiteboards.".to_string(),
            ],
            timing: "15 minutes".to_string(),
        },
        LessonSegment {
            label: "Guided Practice".to_string(),
            purpose: "Practice together while support is immediately available.".to_string(),
            steps: vec![
                "Work through two problems as a class, students leading the steps.".to_string(),
                "Circulate while pairs attempt a problem together.".to_string(),
                "Address the most common error observed before moving on.".to_string(),
            ],
            timing: "10 minutes".to_string(),
        },
        LessonSegment {
            label: "Independent Practice".to_string(),
            purpose: format!("Give every student individual time to apply {topic}."),
            steps: vec![
                "Students complete the practice set on their own.".to_string(),
                "Early finishers attempt the challenge extension.".to_string(),
                "Teacher conferences briefly with students who need support.".to_string(),
            ],
            timing: "10 minutes".to_string(),
        },
        LessonSegment {
            label: "Assessment & Reflection".to_string(),
            purpose: "Measure today's learning and close the loop on the objectives.".to_string(),
            steps: vec![
                "Students complete the exit ticket individually.".to_string(),
                format!("Class shares one takeaway about {topic} and one open question."),
                "Preview how the next lesson builds on today's work.".to_string(),
            ],
            timing: "5 minutes".to_string(),
        },
    ]
}

/// Exactly five questions: one closed-option, four open-response.
fn build_quiz(topic: &str, subject: &str) -> Quiz {
    Quiz {
        title: format!("{topic} Check for Understanding"),
        format: "Mixed: 1 multiple choice, 4 open response".to_string(),
        questions: vec![
            QuizQuestion {
                question: format!("Which statement best describes {topic}?"),
                options: vec![
                    format!("A. A central idea studied in {subject}."),
                    "B. A topic unrelated to this unit.".to_string(),
                    "C. A term with no agreed meaning.".to_string(),
                    "D. None of the above.".to_string(),
                ],
                answer: format!("A. A central idea studied in {subject}."),
                explanation: format!(
                    "{topic} is a core part of this {subject} unit; the other options misstate it."
                ),
            },
            QuizQuestion {
                question: format!("In your own words, explain the main idea of {topic}."),
                options: vec![],
                answer: format!("A clear restatement of the main idea of {topic} in the student's own words."),
                explanation: "Restating the concept shows comprehension beyond memorization.".to_string(),
            },
            QuizQuestion {
                question: format!("Give one real-world example where {topic} matters, and say why."),
                options: vec![],
                answer: format!("Any reasonable real-world example connected to {topic} with a stated reason."),
                explanation: "Connecting to a real context demonstrates transfer.".to_string(),
            },
            QuizQuestion {
                question: format!("What is one common mistake people make when working with {topic}?"),
                options: vec![],
                answer: "Any plausible misconception with a short correction.".to_string(),
                explanation: "Naming misconceptions strengthens accurate understanding.".to_string(),
            },
            QuizQuestion {
                question: format!("What question do you still have about {topic}?"),
                options: vec![],
                answer: "Any genuine question; graded for engagement rather than correctness.".to_string(),
                explanation: "Surfacing open questions guides the next lesson.".to_string(),
            },
        ],
    }
}

fn build_student_notes(topic: &str, subject: &str, grade: &str) -> StudentNotes {
    StudentNotes {
        summary: format!(
            "Today in {subject} we studied {topic}. We started with what we already \
             knew, learned the key ideas with worked examples, practiced together, \
             and then worked on our own. These notes collect the vocabulary and \
             study strategies for {grade} students reviewing {topic}."
        ),
        vocabulary: vec![
            VocabularyEntry {
                term: format!("{topic} (key term 1)"),
                definition: format!("The first essential term for {topic}; record the class definition here."),
            },
            VocabularyEntry {
                term: format!("{topic} (key term 2)"),
                definition: format!("The second essential term for {topic}; record the class definition here."),
            },
            VocabularyEntry {
                term: format!("{topic} (key term 3)"),
                definition: format!("The third essential term for {topic}; record the class definition here."),
            },
        ],
        study_tips: vec![
            format!("Re-read your notes on {topic} the same evening and highlight the main idea."),
            "Explain the concept out loud to a family member or friend.".to_string(),
            "Redo one practice problem from class without looking at the solution.".to_string(),
            "Write your own quiz question and answer it the next day.".to_string(),
        ],
        real_world_connections: vec![
            format!("Look for an example of {topic} at home or in your neighborhood."),
            format!("Find a news story, video, or book that touches on {topic}."),
            format!("Ask an adult how {topic} shows up in their work or daily life."),
        ],
    }
}

fn build_feedback_report(topic: &str, subject: &str, grade: &str) -> FeedbackReport {
    FeedbackReport {
        teacher_summary: format!(
            "The class completed an introductory lesson on {topic} in {subject}. \
             Use the exit tickets and guided-practice observations to identify \
             which students need reteaching before the next lesson."
        ),
        strengths: vec![
            "Students engaged actively with the opening hook and shared prior knowledge.".to_string(),
            format!("Most students could restate the main idea of {topic} during guided practice."),
            "Pair work was productive and students supported one another.".to_string(),
        ],
        next_steps: vec![
            format!("Review the most common exit-ticket error on {topic} at the start of the next lesson."),
            "Provide a targeted small-group session for students who needed support.".to_string(),
            format!("Extend confident students with an application task that goes beyond {topic} basics."),
        ],
        parent_note: format!(
            "Today your child learned about {topic} in {subject}. Ask them to share \
             one thing they found interesting. A short conversation at home helps \
             {grade} students retain what they learned."
        ),
    }
}

/// Two fixed aids when requested; `None` (not an empty list) otherwise.
fn build_teaching_aids(request: &GenerationRequest) -> Option<Vec<TeachingAid>> {
    if !request.include_aids {
        return None;
    }
    let topic = &request.topic;
    Some(vec![
        TeachingAid {
            title: format!("{topic} Anchor Chart"),
            prompt: format!(
                "A clear classroom anchor chart illustrating the key ideas of {topic}, \
                 with simple labeled diagrams and large readable text."
            ),
            usage: "Display during direct instruction and leave up for reference all unit.".to_string(),
        },
        TeachingAid {
            title: format!("{topic} Real-World Scene"),
            prompt: format!(
                "An engaging illustration of {topic} appearing in an everyday real-world \
                 scene that students would recognize."
            ),
            usage: "Use as the opening hook to prompt predictions and discussion.".to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(include_aids: bool) -> GenerationRequest {
        GenerationRequest {
            subject: "Science".to_string(),
            topic: "Photosynthesis".to_string(),
            grade_level: "5th grade".to_string(),
            learning_objectives: "Explain X.\n\nApply X.\n".to_string(),
            duration: None,
            assessment_type: None,
            tone: Some("warm".to_string()),
            focus_skills: None,
            include_aids,
        }
    }

    #[test]
    fn structure_contract_holds() {
        let package = build_fallback(&request(true));
        assert_eq!(package.quiz.questions.len(), 5);
        assert_eq!(package.lesson_plan.segments.len(), 5);
        assert_eq!(package.lesson_plan.differentiation.len(), 2);
        assert!(package.student_notes.study_tips.len() >= 3);
        assert_eq!(package.student_notes.vocabulary.len(), 3);
        assert!(package.lesson_plan.overview.len() >= 3);
        assert!(package.lesson_plan.standards.len() >= 3);
        assert!(package.lesson_plan.materials.len() >= 3);
        assert!(package.feedback_report.strengths.len() >= 3);
        assert!(package.feedback_report.next_steps.len() >= 3);
        assert!(package.student_notes.real_world_connections.len() >= 3);
    }

    #[test]
    fn quiz_has_one_closed_and_four_open_questions() {
        let package = build_fallback(&request(true));
        let closed = package
            .quiz
            .questions
            .iter()
            .filter(|q| !q.options.is_empty())
            .count();
        assert_eq!(closed, 1);
        assert_eq!(package.quiz.questions[0].options.len(), 4);
    }

    #[test]
    fn objectives_are_copied_verbatim_from_the_split() {
        let package = build_fallback(&request(true));
        assert_eq!(
            package.lesson_plan.learning_objectives,
            vec!["Explain X.", "Apply X."]
        );
    }

    #[test]
    fn aids_present_iff_requested() {
        let with_aids = build_fallback(&request(true));
        let aids = with_aids.teaching_aids.expect("aids should be present");
        assert_eq!(aids.len(), 2);

        let without_aids = build_fallback(&request(false));
        assert!(without_aids.teaching_aids.is_none());
    }

    #[test]
    fn metadata_identifies_the_fallback_and_the_tone() {
        let package = build_fallback(&request(true));
        assert_eq!(package.metadata.model, FALLBACK_MODEL_ID);
        assert_eq!(package.metadata.tone, "warm");
    }

    #[test]
    fn structurally_deterministic_across_calls() {
        let request = request(true);
        let first = build_fallback(&request);
        let second = build_fallback(&request);
        assert_eq!(first.quiz.questions.len(), second.quiz.questions.len());
        assert_eq!(
            first.lesson_plan.segments.len(),
            second.lesson_plan.segments.len()
        );
        assert_eq!(
            first.teaching_aids.is_some(),
            second.teaching_aids.is_some()
        );
        assert_eq!(
            first.lesson_plan.learning_objectives,
            second.lesson_plan.learning_objectives
        );
    }

    #[test]
    fn parent_note_interpolates_its_inputs() {
        let package = build_fallback(&request(true));
        let note = &package.feedback_report.parent_note;
        assert!(note.contains("Photosynthesis"));
        assert!(note.contains("Science"));
        assert!(note.contains("5th grade"));
        assert!(!note.contains('{'), "no unsubstituted placeholders: {note}");
    }

    #[test]
    fn segment_timings_sum_to_the_standard_block() {
        let package = build_fallback(&request(true));
        let total: u32 = package
            .lesson_plan
            .segments
            .iter()
            .map(|s| {
                s.timing
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<u32>().ok())
                    .unwrap_or(0)
            })
            .sum();
        assert_eq!(total, 45);
    }
}

//! services/api/src/web/rest.rs
//!
//! Contains the Axum handler for the REST API endpoint and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use lesson_forge_core::{
    domain::{
        Differentiation, FeedbackReport, GenerationRequest, LessonPackage, LessonPlan,
        LessonSegment, PackageMetadata, Quiz, QuizQuestion, StudentNotes, TeachingAid,
        VocabularyEntry,
    },
    validate::{validate_request, FieldViolation},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_lesson_handler,
    ),
    components(
        schemas(
            GenerationRequest,
            LessonPackage,
            LessonPlan,
            LessonSegment,
            Differentiation,
            Quiz,
            QuizQuestion,
            StudentNotes,
            VocabularyEntry,
            FeedbackReport,
            TeachingAid,
            PackageMetadata,
            FieldViolation,
            ValidationErrorResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Lesson Forge API", description = "API endpoint for generating structured lesson packages.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// The body returned when request validation fails.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<FieldViolation>,
}

/// The body returned for unexpected internal failures. Carries a generic
/// message only; internal detail stays in the logs.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a lesson package.
///
/// Validates the JSON body against the request schema, then produces a
/// package through live generation or the template fallback. Both paths
/// answer 200; only validation failures and unexpected internal errors
/// surface as error responses.
#[utoipa::path(
    post,
    path = "/lesson-packages",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Lesson package generated (live or fallback)", body = LessonPackage),
        (status = 422, description = "Request failed schema validation", body = ValidationErrorResponse),
        (status = 500, description = "Unexpected internal error", body = ErrorResponse)
    )
)]
pub async fn generate_lesson_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let request = match validate_request(&body) {
        Ok(request) => request,
        Err(validation) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse {
                    error: "Request validation failed".to_string(),
                    details: validation.violations,
                }),
            )
                .into_response();
        }
    };

    let generated = app_state.orchestrator.generate(&request).await;
    info!(
        source = ?generated.source,
        subject = %request.subject,
        topic = %request.topic,
        "Produced lesson package"
    );

    // Serialization is the only remaining fallible step; its failure is the
    // generic 500 of the inbound contract.
    match serde_json::to_value(&generated.package) {
        Ok(package_json) => (StatusCode::OK, Json(package_json)).into_response(),
        Err(e) => {
            error!("Failed to serialize lesson package: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "An unexpected internal error occurred".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use lesson_forge_core::domain::FALLBACK_MODEL_ID;
    use lesson_forge_core::orchestrator::GenerationOrchestrator;
    use serde_json::json;
    use tracing::Level;

    fn offline_state() -> Arc<AppState> {
        Arc::new(AppState {
            orchestrator: GenerationOrchestrator::new(None),
            config: Arc::new(Config {
                bind_address: "127.0.0.1:0".parse().unwrap(),
                log_level: Level::INFO,
                openai_api_key: None,
                generation_model: "gpt-4o-mini".to_string(),
            }),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_body_maps_to_422_with_field_details() {
        let response =
            generate_lesson_handler(State(offline_state()), Json(json!({"subject": "Math"})))
                .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Request validation failed");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"topic"));
        assert!(fields.contains(&"gradeLevel"));
        assert!(fields.contains(&"learningObjectives"));
    }

    #[tokio::test]
    async fn valid_body_without_provider_answers_200_with_fallback_package() {
        let response = generate_lesson_handler(
            State(offline_state()),
            Json(json!({
                "subject": "Science",
                "topic": "Photosynthesis",
                "gradeLevel": "5th grade",
                "learningObjectives": "Explain X.\n\nApply X.\n",
                "includeAids": false,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metadata"]["model"], FALLBACK_MODEL_ID);
        assert_eq!(body["quiz"]["questions"].as_array().unwrap().len(), 5);
        assert_eq!(
            body["lessonPlan"]["learningObjectives"],
            json!(["Explain X.", "Apply X."])
        );
        assert!(body.get("teachingAids").is_none());
    }
}

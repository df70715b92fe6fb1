//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for curricula,
//! lessons and the tutoring chat. It uses `utoipa` doc comments to generate
//! OpenAPI documentation.

use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use seekho_core::{SeekhoError, gateway::ImageAttachment};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    models::{
        CurriculumModule, ErrorResponse, LessonResponse, StatusMessage, TutorForm, TutorResponse,
    },
    state::AppState,
};

/// MIME type assumed for uploads that arrive without a content type.
pub const FALLBACK_IMAGE_MIME: &str = "application/octet-stream";

pub enum ApiError {
    /// The multipart body could not be read.
    Multipart(MultipartError),
    /// A required form field was missing or unusable.
    Unprocessable(String),
    /// Generation failed; `action` names what was being attempted.
    Generation {
        action: &'static str,
        source: SeekhoError,
    },
}

impl ApiError {
    fn generation(action: &'static str) -> impl FnOnce(SeekhoError) -> ApiError {
        move |source| ApiError::Generation { action, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Multipart(err) => {
                warn!(error = %err, "Rejected multipart body");
                let detail = err.body_text();
                (err.status(), Json(ErrorResponse { detail })).into_response()
            }
            ApiError::Unprocessable(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse { detail })).into_response()
            }
            ApiError::Generation { action, source } => {
                error!(
                    action,
                    retryable = source.is_retryable(),
                    error = %source,
                    "Internal Server Error"
                );
                let detail = format!("Error {}: {}", action, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { detail }),
                )
                    .into_response()
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = StatusMessage)
    )
)]
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Seekho AI API is running!".to_string(),
    })
}

/// Generate the course curriculum and remember each module's title.
#[utoipa::path(
    get,
    path = "/curriculum/{course_name}",
    responses(
        (status = 200, description = "Generated modules", body = [CurriculumModule]),
        (status = 500, description = "Generation or parsing failed", body = ErrorResponse)
    ),
    params(
        ("course_name" = String, Path, description = "Course identifier; the built-in prompt always describes the Solar Panel Technician course")
    )
)]
pub async fn get_curriculum(
    State(state): State<Arc<AppState>>,
    Path(course_name): Path<String>,
) -> Result<Json<Vec<CurriculumModule>>, ApiError> {
    let modules = state
        .curriculum_service
        .generate_curriculum(&course_name)
        .await
        .map_err(ApiError::generation("generating curriculum"))?;
    Ok(Json(modules))
}

/// Generate the lesson body for a module.
#[utoipa::path(
    get,
    path = "/lesson/{module_id}",
    responses(
        (status = 200, description = "Lesson content in Markdown", body = LessonResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    ),
    params(
        ("module_id" = String, Path, description = "Module identifier from a generated curriculum")
    )
)]
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(module_id): Path<String>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = state
        .curriculum_service
        .generate_lesson(&module_id)
        .await
        .map_err(ApiError::generation("generating lesson"))?;
    Ok(Json(lesson))
}

/// Ask the tutor a question, optionally attaching a photo.
#[utoipa::path(
    post,
    path = "/tutor",
    request_body(content = TutorForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Tutor answer", body = TutorResponse),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 422, description = "Missing question", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn tutor(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<TutorResponse>, ApiError> {
    let (question, image) = read_tutor_form(&mut multipart).await?;

    let response = state
        .tutor_service
        .answer(&question, image)
        .await
        .map_err(ApiError::generation("processing tutor request"))?;
    Ok(Json(TutorResponse { response }))
}

/// Pulls `question` and the optional `image` out of the form. Other fields are
/// ignored, and an empty `image` part counts as no image.
async fn read_tutor_form(
    multipart: &mut Multipart,
) -> Result<(String, Option<ImageAttachment>), ApiError> {
    let mut question = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("question") => question = Some(field.text().await?),
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_IMAGE_MIME)
                    .to_string();
                let data = field.bytes().await?;
                if data.is_empty() {
                    continue;
                }
                info!(mime_type = %mime_type, bytes = data.len(), "Received tutor image");
                image = Some(ImageAttachment::new(mime_type, data));
            }
            _ => {}
        }
    }

    let question = question
        .ok_or_else(|| ApiError::Unprocessable("Field 'question' is required".to_string()))?;
    Ok((question, image))
}

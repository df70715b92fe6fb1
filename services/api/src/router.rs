//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API, CORS policy, and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        CurriculumModule, ErrorResponse, LessonResponse, StatusMessage, TutorForm, TutorResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::get_curriculum,
        handlers::get_lesson,
        handlers::tutor,
    ),
    components(
        schemas(CurriculumModule, LessonResponse, TutorResponse, TutorForm, StatusMessage, ErrorResponse)
    ),
    tags(
        (name = "Seekho AI API", description = "Curriculum, lesson and tutoring generation for the Solar Panel Technician course")
    )
)]
pub struct ApiDoc;

/// Fully open CORS. Origin, methods and headers are mirrored from the request
/// because a wildcard cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.config.max_upload_bytes;

    let api_router = Router::new()
        .route("/", get(handlers::root))
        .route("/curriculum/{course_name}", get(handlers::get_curriculum))
        .route("/lesson/{module_id}", get(handlers::get_lesson))
        .route("/tutor", post(handlers::tutor))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
        .layer(cors_layer())
}

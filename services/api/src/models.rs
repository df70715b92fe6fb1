//! API Models
//!
//! Request and response bodies for the HTTP surface, with `utoipa` schemas for
//! the OpenAPI document. Curriculum modules and lessons are defined in
//! `seekho_core::curriculum` and re-exported here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use seekho_core::curriculum::{CurriculumModule, Lesson as LessonResponse};

/// Liveness payload returned by `GET /`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StatusMessage {
    #[schema(example = "Seekho AI API is running!")]
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TutorResponse {
    pub response: String,
}

/// Multipart body accepted by `POST /tutor`. Only used for documentation;
/// the handler reads the fields directly from the multipart stream.
#[derive(ToSchema)]
pub struct TutorForm {
    #[schema(example = "What is a solar cell?")]
    pub question: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

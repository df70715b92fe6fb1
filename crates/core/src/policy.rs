//! Model routing policy: which model and which prompt template serve a task.

use crate::error::{Result, SeekhoError};
use crate::prompts::PromptKey;
use std::collections::HashMap;
use std::fmt;

/// The generation tasks the service performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Curriculum,
    Lesson,
    Tutor,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Curriculum => write!(f, "curriculum"),
            Task::Lesson => write!(f, "lesson"),
            Task::Tutor => write!(f, "tutor"),
        }
    }
}

/// The model and template chosen for one `(task, has_image)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub model: String,
    pub prompt: PromptKey,
}

impl Route {
    pub fn new(model: impl Into<String>, prompt: PromptKey) -> Self {
        Self {
            model: model.into(),
            prompt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelPolicy {
    routes: HashMap<(Task, bool), Route>,
}

impl ModelPolicy {
    /// The standard table: text work goes to `fast_model`, tutoring with an
    /// attached image goes to `multimodal_model`.
    pub fn new(fast_model: impl Into<String>, multimodal_model: impl Into<String>) -> Self {
        let fast_model = fast_model.into();
        let routes = HashMap::from([
            (
                (Task::Curriculum, false),
                Route::new(fast_model.clone(), PromptKey::Curriculum),
            ),
            (
                (Task::Lesson, false),
                Route::new(fast_model.clone(), PromptKey::Lesson),
            ),
            (
                (Task::Tutor, false),
                Route::new(fast_model, PromptKey::TutorText),
            ),
            (
                (Task::Tutor, true),
                Route::new(multimodal_model, PromptKey::TutorImage),
            ),
        ]);
        Self { routes }
    }

    pub fn resolve(&self, task: Task, has_image: bool) -> Result<&Route> {
        self.routes.get(&(task, has_image)).ok_or_else(|| {
            SeekhoError::InvalidRequest(format!(
                "no model route for task '{task}' (image attached: {has_image})"
            ))
        })
    }
}

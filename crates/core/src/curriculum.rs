//! Curriculum and Lesson Generation
//!
//! This module turns the course outline produced by the model into typed
//! modules, remembers each module's title, and later uses those titles to
//! request the Markdown body of individual lessons.

use crate::{
    error::Result,
    gateway::{GenerationRequest, ModelGateway},
    normalize::extract_fenced_payload,
    policy::{ModelPolicy, Task},
    prompts::PromptCatalog,
    titles::ModuleTitleStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;

/// One unit of a generated curriculum, exactly as the model described it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurriculumModule {
    #[schema(example = "module_1")]
    pub module_id: String,
    #[schema(example = "Understanding Sunlight and Electricity")]
    pub title: String,
    pub description: String,
}

/// The generated body of a single lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    pub title: String,
    /// Markdown text.
    pub content: String,
}

/// Defines the contract for any service that can produce curricula and lessons.
#[async_trait]
pub trait CurriculumService: Send + Sync {
    /// Generates the module list for a course and records every module title.
    ///
    /// # Arguments
    ///
    /// * `course_name` - Only used if the active curriculum template asks for it.
    async fn generate_curriculum(&self, course_name: &str) -> Result<Vec<CurriculumModule>>;

    /// Generates lesson content for a module, falling back to a default title
    /// when the module was never part of a generated curriculum.
    async fn generate_lesson(&self, module_id: &str) -> Result<Lesson>;
}

/// A `CurriculumService` backed by a generative model.
pub struct LLMCurriculumService {
    gateway: Arc<dyn ModelGateway>,
    policy: Arc<ModelPolicy>,
    prompts: Arc<PromptCatalog>,
    titles: Arc<dyn ModuleTitleStore>,
}

impl LLMCurriculumService {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        policy: Arc<ModelPolicy>,
        prompts: Arc<PromptCatalog>,
        titles: Arc<dyn ModuleTitleStore>,
    ) -> Self {
        Self {
            gateway,
            policy,
            prompts,
            titles,
        }
    }
}

/// Parses curriculum output, tolerating a Markdown fence around the JSON.
pub fn parse_curriculum(raw: &str) -> Result<Vec<CurriculumModule>> {
    Ok(serde_json::from_str(extract_fenced_payload(raw))?)
}

#[async_trait]
impl CurriculumService for LLMCurriculumService {
    async fn generate_curriculum(&self, course_name: &str) -> Result<Vec<CurriculumModule>> {
        let route = self.policy.resolve(Task::Curriculum, false)?;
        let prompt = self.prompts.curriculum_prompt(route.prompt, course_name);

        let raw = self
            .gateway
            .generate(GenerationRequest::text(&route.model, prompt))
            .await?;
        debug!(raw_len = raw.len(), "Received curriculum output");

        let modules = parse_curriculum(&raw)?;
        for module in &modules {
            self.titles.set(&module.module_id, &module.title).await;
        }

        info!(
            course = %course_name,
            modules = modules.len(),
            "Curriculum generated"
        );
        Ok(modules)
    }

    async fn generate_lesson(&self, module_id: &str) -> Result<Lesson> {
        let route = self.policy.resolve(Task::Lesson, false)?;
        let title = self.titles.title_or_default(module_id).await;
        let prompt = self.prompts.lesson_prompt(route.prompt, &title);

        let content = self
            .gateway
            .generate(GenerationRequest::text(&route.model, prompt))
            .await?;

        info!(module_id = %module_id, title = %title, "Lesson generated");
        Ok(Lesson { title, content })
    }
}

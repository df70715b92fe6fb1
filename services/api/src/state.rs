//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the generation services and configuration.

use crate::config::Config;
use seekho_core::{
    curriculum::{CurriculumService, LLMCurriculumService},
    gateway::ModelGateway,
    policy::ModelPolicy,
    prompts::PromptCatalog,
    titles::ModuleTitleStore,
    tutor::{LLMTutorService, TutorService},
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub curriculum_service: Arc<dyn CurriculumService>,
    pub tutor_service: Arc<dyn TutorService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the model-backed services around a single gateway. The model
    /// routing table comes from the configured fast and multimodal models.
    pub fn new(
        config: Config,
        gateway: Arc<dyn ModelGateway>,
        prompts: PromptCatalog,
        titles: Arc<dyn ModuleTitleStore>,
    ) -> Self {
        let policy = Arc::new(ModelPolicy::new(
            config.fast_model.clone(),
            config.multimodal_model.clone(),
        ));
        let prompts = Arc::new(prompts);

        Self {
            curriculum_service: Arc::new(LLMCurriculumService::new(
                gateway.clone(),
                policy.clone(),
                prompts.clone(),
                titles,
            )),
            tutor_service: Arc::new(LLMTutorService::new(gateway, policy, prompts)),
            config: Arc::new(config),
        }
    }
}

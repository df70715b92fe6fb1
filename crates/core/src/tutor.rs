//! Tutoring chat: answers a student's question, optionally about a photo.

use crate::{
    error::Result,
    gateway::{GenerationRequest, ImageAttachment, ModelGateway},
    policy::{ModelPolicy, Task},
    prompts::PromptCatalog,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Answers `question`. When `image` is present the multimodal route is used
    /// and the image travels with the prompt.
    async fn answer(&self, question: &str, image: Option<ImageAttachment>) -> Result<String>;
}

pub struct LLMTutorService {
    gateway: Arc<dyn ModelGateway>,
    policy: Arc<ModelPolicy>,
    prompts: Arc<PromptCatalog>,
}

impl LLMTutorService {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        policy: Arc<ModelPolicy>,
        prompts: Arc<PromptCatalog>,
    ) -> Self {
        Self {
            gateway,
            policy,
            prompts,
        }
    }
}

#[async_trait]
impl TutorService for LLMTutorService {
    async fn answer(&self, question: &str, image: Option<ImageAttachment>) -> Result<String> {
        let has_image = image.is_some();
        let route = self.policy.resolve(Task::Tutor, has_image)?;
        let prompt = self.prompts.tutor_prompt(route.prompt, question);

        let mut request = GenerationRequest::text(&route.model, prompt);
        if let Some(image) = image {
            request = request.with_image(image);
        }
        let answer = self.gateway.generate(request).await?;

        info!(model = %route.model, has_image, "Tutor answered");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SeekhoError, gateway::MockModelGateway};

    fn service(gateway: MockModelGateway) -> LLMTutorService {
        LLMTutorService::new(
            Arc::new(gateway),
            Arc::new(ModelPolicy::new("fast-model", "vision-model")),
            Arc::new(PromptCatalog::default()),
        )
    }

    #[tokio::test]
    async fn test_text_question_uses_fast_model() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .withf(|req| {
                req.model == "fast-model"
                    && req.image.is_none()
                    && req.prompt
                        == "You are a helpful AI tutor. A student is asking: 'What is a solar cell?'. Answer them clearly and simply."
            })
            .times(1)
            .returning(|_| Ok("A solar cell turns light into electricity.".to_string()));

        let answer = service(gateway)
            .answer("What is a solar cell?", None)
            .await
            .unwrap();
        assert_eq!(answer, "A solar cell turns light into electricity.");
    }

    #[tokio::test]
    async fn test_image_question_uses_multimodal_model_and_sends_bytes() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .withf(|req| {
                req.model == "vision-model"
                    && req.prompt.contains("has sent this image and asked: 'Is this safe?'")
                    && req.image
                        == Some(ImageAttachment::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]))
            })
            .times(1)
            .returning(|_| Ok("Please switch off the isolator first.".to_string()));

        let image = ImageAttachment::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        let answer = service(gateway)
            .answer("Is this safe?", Some(image))
            .await
            .unwrap();
        assert_eq!(answer, "Please switch off the isolator first.");
    }

    #[tokio::test]
    async fn test_gateway_failure_is_returned() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .returning(|_| Err(SeekhoError::EmptyResponse));

        let err = service(gateway).answer("Why?", None).await.unwrap_err();
        assert!(matches!(err, SeekhoError::EmptyResponse));
    }
}

//! Model Gateway
//!
//! A thin adapter over the hosted generative-model service. Callers hand over
//! a fully rendered prompt, the model to use and an optional image; the gateway
//! returns the raw text of the first candidate.

use crate::error::{Result, SeekhoError};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, FinishReason,
        ImageUrlArgs,
    },
};
use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use tracing::debug;

/// An image uploaded alongside a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Inline `data:` URL carrying the base64-encoded bytes.
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

/// A single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub image: Option<ImageAttachment>,
}

impl GenerationRequest {
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }
}

/// Anything that can turn a prompt into model text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends one request and returns the raw text of the reply.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// A `ModelGateway` for any OpenAI-compatible chat completions API, including
/// Gemini's compatibility endpoint.
pub struct OpenAICompatibleGateway {
    client: Client<OpenAIConfig>,
}

impl OpenAICompatibleGateway {
    /// # Arguments
    ///
    /// * `config` - API key and base URL of the model service.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait]
impl ModelGateway for OpenAICompatibleGateway {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            image_bytes = request.image.as_ref().map(|i| i.data.len()),
            "Sending generation request"
        );

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![user_message(&request)?])
            .build()?;

        let response = self.client.chat().create(chat_request).await?;
        first_candidate_text(response)
    }
}

/// Builds the single user turn: plain text, or text plus an inline image part.
fn user_message(request: &GenerationRequest) -> Result<ChatCompletionRequestMessage> {
    let message = match &request.image {
        None => ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.clone())
            .build()?,
        Some(image) => ChatCompletionRequestUserMessageArgs::default()
            .content(vec![
                ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(request.prompt.clone())
                    .build()?
                    .into(),
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(ImageUrlArgs::default().url(image.data_url()).build()?)
                    .build()?
                    .into(),
            ])
            .build()?,
    };
    Ok(message.into())
}

fn first_candidate_text(response: CreateChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(SeekhoError::EmptyResponse)?;

    if choice.finish_reason == Some(FinishReason::ContentFilter) {
        return Err(SeekhoError::upstream(
            "The model service blocked the response under its content policy",
        ));
    }

    choice
        .message
        .content
        .filter(|content| !content.is_empty())
        .ok_or(SeekhoError::EmptyResponse)
}

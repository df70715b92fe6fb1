//! Error types shared by every Seekho service.

use async_openai::error::OpenAIError;

/// Everything that can go wrong between receiving a request and returning model output.
#[derive(Debug, thiserror::Error)]
pub enum SeekhoError {
    /// The model service rejected or failed the call (network, auth, quota, content policy).
    #[error("{message}")]
    Upstream { message: String },
    /// The model service answered without any candidate text.
    #[error("Model returned an empty response")]
    EmptyResponse,
    /// The model output could not be parsed into the expected shape.
    #[error("{0}")]
    MalformedOutput(#[from] serde_json::Error),
    /// The outbound request could not be built.
    #[error("Invalid model request: {0}")]
    InvalidRequest(String),
}

impl SeekhoError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::EmptyResponse)
    }
}

impl From<OpenAIError> for SeekhoError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::InvalidArgument(message) => Self::InvalidRequest(message),
            OpenAIError::ApiError(api_error) => Self::Upstream {
                message: api_error.message,
            },
            other => Self::Upstream {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SeekhoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_displays_raw_message() {
        let err = SeekhoError::upstream("API key not valid. Please pass a valid API key.");
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_output_is_not_retryable() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err = SeekhoError::from(parse_err);
        assert!(matches!(err, SeekhoError::MalformedOutput(_)));
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("expected"));
    }

    #[test]
    fn test_openai_invalid_argument_maps_to_invalid_request() {
        let err = SeekhoError::from(OpenAIError::InvalidArgument("model is required".into()));
        match err {
            SeekhoError::InvalidRequest(msg) => assert_eq!(msg, "model is required"),
            other => panic!("Expected InvalidRequest, got {other:?}"),
        }
    }
}

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Sampling parameters passed with every generation call.
///
/// Sampling is always on, so two calls with the same prompt are not expected to
/// return the same text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct GenerationParams {
    pub(crate) max_length: u32,
    pub(crate) temperature: f32,
    pub(crate) top_p: f32,
    pub(crate) do_sample: bool,
    pub(crate) num_return_sequences: u32,
}

impl GenerationParams {
    pub(crate) const TITLE: Self = Self::sampled(50);
    pub(crate) const CHUNK: Self = Self::sampled(256);

    const fn sampled(max_length: u32) -> Self {
        Self {
            max_length,
            temperature: 0.8,
            top_p: 0.9,
            do_sample: true,
            num_return_sequences: 1,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum GenerationError {
    #[error("generator request failed: {0}")]
    Transport(String),

    #[error("generator responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("generator response could not be decoded: {0}")]
    Decode(String),

    #[error("generator returned no text")]
    EmptyOutput,
}

#[async_trait]
pub(crate) trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::seo::generator::{GenerationError, GenerationParams, TextGenerator};
use crate::infrastructure::settings::GeneratorSettings;

/// Text2text model served over HTTP with the Hugging Face inference API shape:
/// `{"inputs": ..., "parameters": {...}}` in, `[{"generated_text": ...}]` out.
pub(crate) struct HttpTextGenerator {
    url: String,
    api_token: Option<String>,
    client: Client,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Deserialize)]
struct InferenceErrorBody {
    error: String,
}

impl HttpTextGenerator {
    pub(crate) fn new(settings: &GeneratorSettings) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        Ok(Self {
            url: settings.url.clone(),
            api_token: settings.api_token.clone(),
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: params,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<InferenceErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let decoded = response
            .json::<InferenceResponse>()
            .await
            .map_err(|err| GenerationError::Decode(err.to_string()))?;

        let text = first_generated_text(decoded).ok_or(GenerationError::EmptyOutput)?;
        debug!(chars = text.chars().count(), "generator returned text");
        Ok(text)
    }
}

fn first_generated_text(response: InferenceResponse) -> Option<String> {
    let generated = match response {
        InferenceResponse::Batch(items) => items.into_iter().next()?,
        InferenceResponse::Single(item) => item,
    };
    let text = generated.generated_text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

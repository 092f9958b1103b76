//! Anthropic completion gateway implementation

use super::error::AnthropicError;
use super::types::{MessagesRequest, MessagesResponse, extract_error_message};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use polyglot_application::CompletionGateway;
use polyglot_domain::{CompletionOutcome, ComposedPrompt, Credential};
use std::time::Duration;
use tracing::{debug, warn};

const X_API_KEY: &str = "x-api-key";
const ANTHROPIC_VERSION: &str = "anthropic-version";

/// Message used when an error reply carries no readable message
const GENERIC_FAILURE: &str = "API request failed";

/// Synthetic status for transport failures other than timeouts
const STATUS_BAD_GATEWAY: u16 = 502;
/// Synthetic status for client-side timeouts
const STATUS_GATEWAY_TIMEOUT: u16 = 504;

/// Gateway to the Anthropic Messages API.
///
/// Holds only immutable settings and a `reqwest::Client`, so it is cheap to
/// clone and safe to share across concurrent translations.
#[derive(Clone)]
pub struct AnthropicCompletionGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_version: String,
}

impl std::fmt::Debug for AnthropicCompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicCompletionGateway")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl AnthropicCompletionGateway {
    pub fn new(config: &FileProviderConfig) -> Result<Self, AnthropicError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.messages_url(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_version: config.api_version.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn transport_failure(error: reqwest::Error) -> CompletionOutcome {
        let status = if error.is_timeout() {
            STATUS_GATEWAY_TIMEOUT
        } else {
            STATUS_BAD_GATEWAY
        };
        warn!(status, error = %error, "Completion request failed in transport");
        CompletionOutcome::failure(status, format!("Completion service unreachable: {error}"))
    }
}

#[async_trait]
impl CompletionGateway for AnthropicCompletionGateway {
    async fn complete(
        &self,
        prompt: &ComposedPrompt,
        credential: &Credential,
    ) -> CompletionOutcome {
        let body = MessagesRequest::user(&self.model, self.max_tokens, prompt.as_str());
        debug!(
            model = %self.model,
            prompt_bytes = prompt.len(),
            "Sending completion request"
        );

        let response = match self
            .client
            .post(&self.endpoint)
            .header(X_API_KEY, credential.expose())
            .header(ANTHROPIC_VERSION, &self.api_version)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Self::transport_failure(e),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Self::transport_failure(e),
        };

        if !status.is_success() {
            let message =
                extract_error_message(&text).unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(status = status.as_u16(), "Completion service returned an error");
            return CompletionOutcome::failure(status.as_u16(), message);
        }

        match serde_json::from_str::<MessagesResponse>(&text).map(MessagesResponse::into_first_text)
        {
            Ok(Some(reply)) => {
                debug!(reply_bytes = reply.len(), "Completion received");
                CompletionOutcome::success(reply)
            }
            Ok(None) => {
                warn!("Completion reply contained no text");
                CompletionOutcome::failure(
                    STATUS_BAD_GATEWAY,
                    "Completion service reply contained no text",
                )
            }
            Err(e) => {
                warn!(error = %e, "Completion reply was not a valid envelope");
                CompletionOutcome::failure(
                    STATUS_BAD_GATEWAY,
                    format!("Unreadable completion service reply: {e}"),
                )
            }
        }
    }
}

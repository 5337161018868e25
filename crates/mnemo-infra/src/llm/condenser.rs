//! Condenser backed by any OpenAI-compatible chat completions endpoint.
//!
//! Uses [`async_openai`] with a configurable base URL, so the same client
//! talks to OpenAI, a local Ollama server (`http://localhost:11434/v1`),
//! vLLM, or anything else speaking the protocol.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};

use mnemo_core::memory::condenser::Condenser;
use mnemo_types::config::CondenserConfig;
use mnemo_types::error::CollaboratorError;

/// Placeholder key for local servers that ignore authentication.
const NO_API_KEY: &str = "not-needed";

/// Build the system prompt for one condensation call.
fn system_prompt(min_length: usize, max_length: usize) -> String {
    format!(
        "You condense text for a long-term memory store. \
         Rewrite the user's text as a single summary of {min_length} to {max_length} tokens. \
         Keep names, numbers and the central claim. \
         Reply with the summary only: no preamble, no quotes, no bullet points."
    )
}

/// Completion token cap: twice the advisory bound, saturating at `u32::MAX`.
fn completion_budget(max_length: usize) -> u32 {
    u32::try_from(max_length.saturating_mul(2)).unwrap_or(u32::MAX)
}

/// Condenser over an OpenAI-compatible chat endpoint.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCondenser {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiCondenser {
    pub fn new(base_url: &str, api_key: &SecretString, model: &str, timeout: Duration) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);

        Self {
            client: Client::with_config(openai_config),
            model: model.to_string(),
            timeout,
        }
    }

    /// Build from configuration, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &CondenserConfig) -> Self {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => SecretString::from(key),
            _ => {
                tracing::debug!(
                    env = %config.api_key_env,
                    "no condenser API key set; assuming a local endpoint"
                );
                SecretString::from(NO_API_KEY.to_string())
            }
        };

        Self::new(
            &config.base_url,
            &api_key,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build_request(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> CreateChatCompletionRequest {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system_prompt(
                    min_length, max_length,
                )),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(text.to_string()),
                name: None,
            }),
        ];

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            // Headroom over the advisory bound so replies are not cut mid-sentence.
            max_completion_tokens: Some(completion_budget(max_length)),
            temperature: Some(0.0),
            ..Default::default()
        }
    }
}

impl Condenser for OpenAiCondenser {
    #[tracing::instrument(
        name = "condense",
        skip(self, text),
        fields(model = %self.model, text_len = text.len())
    )]
    async fn condense(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, CollaboratorError> {
        let request = self.build_request(text, min_length, max_length);

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| CollaboratorError::Timeout(self.timeout.as_secs()))?
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                CollaboratorError::InvalidResponse("completion had no content".into())
            })?;

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "openai-compat"
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`CollaboratorError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> CollaboratorError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            CollaboratorError::Unavailable(format!("API error: {}", api_err.message))
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status() {
            Some(status) => CollaboratorError::Unavailable(format!("HTTP {status}: {err}")),
            None => CollaboratorError::Unavailable(err.to_string()),
        },
        OpenAIError::JSONDeserialize(_, content) => {
            CollaboratorError::InvalidResponse(format!("failed to parse response: {content}"))
        }
        _ => CollaboratorError::Unavailable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condenser() -> OpenAiCondenser {
        OpenAiCondenser::new(
            "http://localhost:11434/v1",
            &SecretString::from("sk-test".to_string()),
            "llama3.2",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_system_prompt_carries_bounds() {
        let prompt = system_prompt(10, 30);
        assert!(prompt.contains("10 to 30 tokens"));
        assert!(prompt.contains("summary only"));
    }

    #[test]
    fn test_build_request() {
        let request = condenser().build_request("Some long passage.", 10, 30);
        assert_eq!(request.model, "llama3.2");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.max_completion_tokens, Some(60));
        assert_eq!(request.temperature, Some(0.0));

        match &request.messages[1] {
            ChatCompletionRequestMessage::User(user) => match &user.content {
                ChatCompletionRequestUserMessageContent::Text(text) => {
                    assert_eq!(text, "Some long passage.");
                }
                _ => panic!("expected text content"),
            },
            _ => panic!("expected user message"),
        }
    }

    #[test]
    fn test_completion_budget_saturates() {
        assert_eq!(completion_budget(30), 60);
        assert_eq!(completion_budget(u32::MAX as usize), u32::MAX);
        assert_eq!(completion_budget(usize::MAX), u32::MAX);
        let request = condenser().build_request("text", 1, usize::MAX);
        assert_eq!(request.max_completion_tokens, Some(u32::MAX));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = CondenserConfig {
            api_key_env: "MNEMO_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            timeout_secs: 7,
            ..CondenserConfig::default()
        };
        let condenser = OpenAiCondenser::from_config(&config);
        assert_eq!(condenser.model, "llama3.2");
        assert_eq!(condenser.timeout, Duration::from_secs(7));
        assert_eq!(condenser.name(), "openai-compat");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        // Port 9 (discard) is closed on any sane test host.
        let condenser = OpenAiCondenser::new(
            "http://127.0.0.1:9/v1",
            &SecretString::from("sk-test".to_string()),
            "llama3.2",
            Duration::from_secs(5),
        );
        let err = condenser.condense("text", 10, 30).await.unwrap_err();
        assert!(matches!(
            err,
            CollaboratorError::Unavailable(_) | CollaboratorError::Timeout(_)
        ));
    }
}

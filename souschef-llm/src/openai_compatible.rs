//! Generic OpenAI-compatible chat-completions client
//!
//! Works against any provider speaking OpenAI's API format (OpenAI,
//! DeepSeek, Together, local gateways, etc.)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use souschef_core::{ChatLlm, ChatRequest, ChatResponse, Message, SousChefError};

/// Request body for the chat completions endpoint
#[derive(Serialize, Debug, Clone)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug, Clone)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug, Clone)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
struct OpenAiError {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    chat_url: Url,
    api_key: Option<SecretString>,
    model: String,
    default_temperature: Option<f32>,
    timeout: Duration,
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleClientBuilder {
        OpenAiCompatibleClientBuilder::default()
    }
}

pub struct OpenAiCompatibleClientBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    model: String,
    default_temperature: Option<f32>,
    timeout: Duration,
}

impl Default for OpenAiCompatibleClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: "gpt-4o".to_string(),
            default_temperature: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl OpenAiCompatibleClientBuilder {
    /// Base URL including any version prefix, e.g. `https://api.openai.com/v1`.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, SousChefError> {
        let parsed = Url::parse(url.as_ref())
            .map_err(|err| SousChefError::InvalidConfig(format!("invalid base url: {err}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = Some(temperature);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, SousChefError> {
        let base = self
            .base_url
            .ok_or_else(|| SousChefError::InvalidConfig("missing base url".to_string()))?;
        let chat_url = Url::parse(&format!(
            "{}/chat/completions",
            base.as_str().trim_end_matches('/')
        ))
        .map_err(|err| SousChefError::InvalidConfig(format!("invalid chat url: {err}")))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| SousChefError::InvalidConfig(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            http,
            chat_url,
            api_key: self.api_key,
            model: self.model,
            default_temperature: self.default_temperature,
            timeout: self.timeout,
        })
    }
}

#[async_trait::async_trait]
impl ChatLlm for OpenAiCompatibleClient {
    async fn invoke(&self, request: ChatRequest) -> Result<ChatResponse, SousChefError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages,
            temperature: request.temperature.or(self.default_temperature),
            stream: false,
        };

        tracing::debug!(model = %self.model, "sending chat completion request");
        let mut http_request = self.http.post(self.chat_url.clone()).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key.expose_secret());
        }

        let response = http_request.send().await.map_err(|err| {
            if err.is_timeout() {
                SousChefError::Timeout(self.timeout)
            } else {
                SousChefError::LlmProvider(err.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| SousChefError::LlmProvider(err.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<OpenAiError>(&text)
                .map(|err| err.error.message)
                .unwrap_or(text);
            return Err(SousChefError::LlmProvider(format!("{status}: {detail}")));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|err| SousChefError::ParseFailed {
                output: text.chars().take(200).collect(),
                reason: err.to_string(),
            })?;

        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| SousChefError::LlmProvider("no choices returned".to_string()))?;

        Ok(ChatResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::builder()
            .base_url(server.base_url())
            .unwrap()
            .api_key("test-key")
            .default_model("gpt-4o")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{"model": "gpt-4o", "stream": false}"#);
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "Whisk the eggs."}}]
            }));
        });

        let client = client_for(&server);
        let response = client
            .invoke(ChatRequest::from_prompts("You are a cook.", "Eggs?"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.content, "Whisk the eggs.");
    }

    #[tokio::test]
    async fn surfaces_provider_error_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({
                "error": {"message": "Incorrect API key provided"}
            }));
        });

        let client = client_for(&server);
        let err = client
            .invoke(ChatRequest::from_prompts("sys", "user"))
            .await
            .unwrap_err();

        match err {
            SousChefError::LlmProvider(message) => {
                assert!(message.contains("Incorrect API key provided"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_a_provider_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        });

        let client = client_for(&server);
        let err = client
            .invoke(ChatRequest::from_prompts("sys", "user"))
            .await
            .unwrap_err();
        assert!(matches!(err, SousChefError::LlmProvider(_)));
    }
}

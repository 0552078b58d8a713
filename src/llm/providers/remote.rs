use crate::config::LlmConfig;
use crate::llm::models::{ChatRequest, ChatResponse};
use crate::llm::prompt::SYSTEM_PROMPT;
use crate::llm::{SqlTranslator, TranslateError};
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI-compatible chat-completions endpoint addressed by a single URL,
/// authenticated with a Bearer token.
pub struct RemoteChatProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl RemoteChatProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, TranslateError> {
        let api_url = config.api_url.clone().ok_or_else(|| {
            TranslateError::ConfigError("API URL is required for the openai backend".to_string())
        })?;

        let api_key = config.api_key.clone().ok_or_else(|| {
            TranslateError::ConfigError("API key is required for the openai backend".to_string())
        })?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranslateError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl SqlTranslator for RemoteChatProvider {
    async fn translate(&self, question: &str) -> Result<String, TranslateError> {
        let request =
            ChatRequest::for_translation(Some(self.model.clone()), SYSTEM_PROMPT, question);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(TranslateError::from_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::UpstreamStatus(status.as_u16(), body));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        chat_response.sql_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_rides_in_request_body() {
        let request = ChatRequest::for_translation(
            Some("gpt-4o-mini".to_string()),
            SYSTEM_PROMPT,
            "question",
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let config = LlmConfig {
            backend: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            api_url: Some("https://api.openai.com/v1/chat/completions".to_string()),
            api_version: "2024-02-15-preview".to_string(),
        };
        assert!(matches!(
            RemoteChatProvider::new(&config),
            Err(TranslateError::ConfigError(_))
        ));
    }
}

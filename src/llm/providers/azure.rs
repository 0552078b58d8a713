use crate::config::LlmConfig;
use crate::llm::models::{ChatRequest, ChatResponse};
use crate::llm::prompt::SYSTEM_PROMPT;
use crate::llm::{SqlTranslator, TranslateError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Azure OpenAI deployment. The deployment name rides in the URL path and
/// the key goes in an `api-key` header, unlike the Bearer-token providers.
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl AzureOpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, TranslateError> {
        let endpoint = config.api_url.clone().ok_or_else(|| {
            TranslateError::ConfigError("API URL is required for the azure backend".to_string())
        })?;

        let api_key = config.api_key.clone().ok_or_else(|| {
            TranslateError::ConfigError("API key is required for the azure backend".to_string())
        })?;

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            config.model,
            config.api_version
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranslateError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl SqlTranslator for AzureOpenAiProvider {
    async fn translate(&self, question: &str) -> Result<String, TranslateError> {
        // Azure identifies the model by deployment path, not request body.
        let request = ChatRequest::for_translation(None, SYSTEM_PROMPT, question);

        debug!("Sending translation request to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
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

    fn config_with(api_url: Option<&str>, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            backend: "azure".to_string(),
            model: "gpt-35-turbo".to_string(),
            api_key: api_key.map(String::from),
            api_url: api_url.map(String::from),
            api_version: "2024-02-15-preview".to_string(),
        }
    }

    #[test]
    fn test_url_includes_deployment_and_api_version() {
        let provider =
            AzureOpenAiProvider::new(&config_with(Some("https://example.azure.com/"), Some("k")))
                .unwrap();
        assert_eq!(
            provider.url,
            "https://example.azure.com/openai/deployments/gpt-35-turbo/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn test_missing_api_url_is_config_error() {
        let err = AzureOpenAiProvider::new(&config_with(None, Some("k"))).err().unwrap();
        assert!(matches!(err, TranslateError::ConfigError(_)));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = AzureOpenAiProvider::new(&config_with(Some("https://example.azure.com"), None))
            .err()
            .unwrap();
        assert!(matches!(err, TranslateError::ConfigError(_)));
    }
}

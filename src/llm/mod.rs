pub mod codes;
pub mod models;
pub mod prompt;
pub mod providers;

use crate::config::LlmConfig;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use tracing::{debug, info};

use codes::AirlineCodeMap;

#[derive(Debug)]
pub enum TranslateError {
    /// The completion call exceeded its deadline.
    Timeout(String),
    /// The completion endpoint could not be reached.
    Unreachable(String),
    /// The endpoint answered with a non-success HTTP status.
    UpstreamStatus(u16, String),
    /// The response body lacked a usable choice/content field.
    InvalidResponse(String),
    ConfigError(String),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Timeout(msg) => write!(f, "completion request timed out: {}", msg),
            TranslateError::Unreachable(msg) => {
                write!(f, "completion endpoint unreachable: {}", msg)
            }
            TranslateError::UpstreamStatus(status, msg) => {
                write!(f, "completion endpoint returned HTTP {}: {}", status, msg)
            }
            TranslateError::InvalidResponse(msg) => {
                write!(f, "invalid completion response: {}", msg)
            }
            TranslateError::ConfigError(msg) => write!(f, "translator configuration error: {}", msg),
        }
    }
}

impl Error for TranslateError {}

impl TranslateError {
    /// Classify a reqwest failure so timeouts and unreachable endpoints
    /// surface as distinct variants.
    pub fn from_request_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslateError::Timeout(err.to_string())
        } else {
            TranslateError::Unreachable(err.to_string())
        }
    }
}

/// Turns a natural-language question into a SQL string via a hosted model.
#[async_trait]
pub trait SqlTranslator: Send + Sync {
    async fn translate(&self, question: &str) -> Result<String, TranslateError>;
}

pub struct TranslatorManager {
    translator: Box<dyn SqlTranslator + Send + Sync>,
    codes: AirlineCodeMap,
}

impl TranslatorManager {
    pub fn new(config: &LlmConfig) -> Result<Self, TranslateError> {
        let translator: Box<dyn SqlTranslator + Send + Sync> = match config.backend.as_str() {
            "azure" => Box::new(providers::azure::AzureOpenAiProvider::new(config)?),
            "openai" => Box::new(providers::remote::RemoteChatProvider::new(config)?),
            _ => {
                return Err(TranslateError::ConfigError(format!(
                    "Unsupported translator backend: {}",
                    config.backend
                )));
            }
        };

        Ok(Self {
            translator,
            codes: AirlineCodeMap::builtin(),
        })
    }

    /// Normalizes airline codes in the question, then asks the model for SQL.
    pub async fn translate(&self, question: &str) -> Result<String, TranslateError> {
        let normalized = self.codes.normalize(question);
        if normalized != question {
            debug!("Normalized question: {}", normalized);
        }

        let sql = self.translator.translate(&normalized).await?;
        info!("Generated SQL: {}", sql);
        Ok(sql)
    }
}

use serde::{Deserialize, Serialize};

use crate::llm::TranslateError;

// Chat-completions wire format shared by both providers.

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: usize,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatRequest {
    /// System + user message pair with the deterministic sampling settings
    /// every translation request uses.
    pub fn for_translation(model: Option<String>, system: &str, user: &str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            max_tokens: 250,
        }
    }
}

impl ChatResponse {
    /// Pulls the SQL text out of the first choice. A missing choice, a
    /// missing content field, or an empty body after trimming are all
    /// validation failures, never an empty default.
    pub fn sql_text(self) -> Result<String, TranslateError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            TranslateError::InvalidResponse("no choices in completion response".to_string())
        })?;

        let content = choice.message.content.ok_or_else(|| {
            TranslateError::InvalidResponse("first choice has no message content".to_string())
        })?;

        let sql = strip_code_fence(content.trim()).trim().to_string();
        if sql.is_empty() {
            return Err(TranslateError::InvalidResponse(
                "completion content was empty".to_string(),
            ));
        }

        Ok(sql)
    }
}

/// Models sometimes wrap the SQL in a markdown code block despite the
/// SQL-only instruction; unwrap it when present.
fn strip_code_fence(content: &str) -> &str {
    if let Some(start) = content.find("```sql") {
        if let Some(end) = content.rfind("```") {
            if end > start + 6 {
                return content[start + 6..end].trim();
            }
        }
    }

    if let Some(stripped) = content.strip_prefix("```") {
        if let Some(end) = stripped.find("```") {
            return stripped[..end].trim();
        }
    }

    content
}

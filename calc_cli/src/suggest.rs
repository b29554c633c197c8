//! AI formula suggestion over a Gemini-style `generateContent` endpoint.
//!
//! One request, no retry. The timeout comes from `[suggest] timeout_secs`.

use std::future::Future;
use std::time::Duration;

use calc_core::suggestion::{FormulaSuggestion, SuggestionRequest};
use calc_core::CalcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::SuggestConfig;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("API key not set: export {0} or change [suggest] api_key_env")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Suggestion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Suggestion service returned no answer")]
    EmptyResponse,

    #[error("Could not understand the suggestion: {0}")]
    InvalidReply(#[from] CalcError),
}

/// Anything that can turn a description into a formula suggestion.
pub trait FormulaSuggester: Send + Sync {
    fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> impl Future<Output = Result<FormulaSuggestion, SuggestError>> + Send;
}

// Wire types for generateContent

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

pub struct GeminiSuggester {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiSuggester {
    pub fn new(endpoint: &str, model: &str, api_key: String, timeout: Duration) -> Result<Self, SuggestError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("Tally/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/models/{}:generateContent", endpoint.trim_end_matches('/'), model),
            api_key,
        })
    }

    /// Build from config, reading the key from the configured variable.
    pub fn from_config(config: &SuggestConfig) -> Result<Self, SuggestError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SuggestError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl FormulaSuggester for GeminiSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<FormulaSuggestion, SuggestError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: SuggestionRequest::response_schema(),
            },
        };

        debug!(url = %self.url, "Requesting formula suggestion");
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.text)
            .ok_or(SuggestError::EmptyResponse)?;

        Ok(FormulaSuggestion::parse(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::Formula;
    use httpmock::prelude::*;

    fn suggester(server: &MockServer) -> GeminiSuggester {
        GeminiSuggester::new(&server.base_url(), "test-model", "secret".to_string(), Duration::from_secs(5)).unwrap()
    }

    fn request(text: &str) -> SuggestionRequest {
        SuggestionRequest::new(text).unwrap()
    }

    #[tokio::test]
    async fn test_successful_suggestion() {
        let server = MockServer::start();
        let reply = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"suggestedFunction\":\"loan-emi\",\"explanation\":\"Computes the monthly installment.\"}"
                    }]
                }
            }]
        });
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/test-model:generateContent")
                .header("x-goog-api-key", "secret")
                .body_contains("Request: monthly payment on a car loan");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(reply);
        });

        let suggestion = suggester(&server)
            .suggest(&request("monthly payment on a car loan"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(suggestion.formula(), Some(Formula::LoanEmi));
        assert_eq!(suggestion.explanation, "Computes the monthly installment.");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(429).body("quota exceeded");
        });

        let err = suggester(&server).suggest(&request("bmi")).await.unwrap_err();
        match err {
            SuggestError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(serde_json::json!({ "candidates": [] }));
        });

        let err = suggester(&server).suggest(&request("bmi")).await.unwrap_err();
        assert!(matches!(err, SuggestError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_malformed_reply_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "I think you want BMI" }] } }]
            }));
        });

        let err = suggester(&server).suggest(&request("bmi")).await.unwrap_err();
        assert!(matches!(err, SuggestError::InvalidReply(_)));
    }

    #[test]
    fn test_missing_api_key() {
        let config = SuggestConfig {
            api_key_env: "TALLY_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..SuggestConfig::default()
        };
        assert!(matches!(
            GeminiSuggester::from_config(&config),
            Err(SuggestError::MissingApiKey(_))
        ));
    }
}

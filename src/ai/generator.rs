use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::build_prompt;
use crate::error::{AppError, Result};
use crate::models::{Article, Platform};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

// Fixed sampling configuration; generation is not user-tunable.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;

/// Message shown in the UI for any generation failure. The root cause is
/// logged for diagnostics only.
const GENERATION_FAILED: &str = "Failed to generate social media post. Please try again.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct PostGenerator {
    client: Client,
    api_key: String,
}

impl PostGenerator {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, api_key }
    }

    /// Requests one generated post. Exactly one network call per invocation;
    /// failures surface immediately with no retry.
    pub async fn generate(&self, article: &Article, platform: Platform) -> Result<String> {
        let prompt = build_prompt(article, platform);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/{}:generateContent",
                GEMINI_API_URL, GEMINI_MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {e}");
                AppError::Generation(GENERATION_FAILED.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: HTTP {status}: {body}");
            return Err(AppError::Generation(GENERATION_FAILED.to_string()));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed Gemini response: {e}");
            AppError::Generation(GENERATION_FAILED.to_string())
        })?;

        extract_text(payload).ok_or_else(|| {
            tracing::error!("Gemini response contained no text candidates");
            AppError::Generation(GENERATION_FAILED.to_string())
        })
    }
}

/// Joins the text parts of the first candidate, trimmed of surrounding
/// whitespace. Returns `None` when no text came back.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let text = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(parts: Vec<Option<&str>>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: parts
                        .into_iter()
                        .map(|text| Part {
                            text: text.map(str::to_string),
                        })
                        .collect(),
                }),
            }],
        }
    }

    #[test]
    fn extracts_and_trims_candidate_text() {
        let text = extract_text(response(vec![Some("  Check this out! #AI #Trends \n")]));
        assert_eq!(text.as_deref(), Some("Check this out! #AI #Trends"));
    }

    #[test]
    fn joins_multiple_parts() {
        let text = extract_text(response(vec![Some("First"), None, Some("Second")]));
        assert_eq!(text.as_deref(), Some("First\nSecond"));
    }

    #[test]
    fn empty_response_yields_none() {
        assert_eq!(
            extract_text(GenerateContentResponse { candidates: vec![] }),
            None
        );
        assert_eq!(extract_text(response(vec![Some("   ")])), None);
    }
}

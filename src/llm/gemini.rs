// ABOUTME: Google Gemini client for meal photo analysis and coaching insights
// ABOUTME: Calls generateContent with inline image data and a JSON response schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Client
//!
//! Implements [`MealAnalyzer`] and [`InsightGenerator`] against the Gemini
//! `generateContent` endpoint.
//!
//! ## Configuration
//!
//! - `GEMINI_API_KEY`: required to construct the client
//! - `GEMINI_MODEL`, `GEMINI_BASE_URL`, `GEMINI_TIMEOUT_SECS`: optional overrides

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use nourish_core::models::MealEstimate;
use nourish_core::{AppError, AppResult, ErrorCode};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument, warn};

use super::prompts::insight_prompt;
use super::{InsightGenerator, MealAnalyzer};
use crate::config::GeminiConfig;

const SERVICE: &str = "Gemini";

/// Request header for the API key; the key never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Photos are captured as JPEG before upload
const IMAGE_MIME_TYPE: &str = "image/jpeg";

// ============================================================================
// Gemini API Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content (text or inline image)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Generation configuration requesting structured JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Schema forcing the four meal estimate fields
fn meal_estimate_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "mealName": { "type": "STRING" },
            "totalCalories": { "type": "NUMBER" },
            "totalProtein": { "type": "NUMBER" },
            "estimatedWeight": { "type": "NUMBER" }
        },
        "required": ["mealName", "totalCalories", "totalProtein", "estimatedWeight"]
    })
}

// ============================================================================
// Client
// ============================================================================

/// Gemini client implementing both model collaborators
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without an API key, or an internal error if the
    /// HTTP client cannot be built
    pub fn new(config: &GeminiConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config_missing("GEMINI_API_KEY is not set"))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Model used for every request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Post a request and return the first candidate's text
    async fn generate(&self, request: &GeminiRequest) -> AppResult<String> {
        let response = self
            .client
            .post(self.build_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let code = if e.is_timeout() || e.is_connect() {
                    ErrorCode::ExternalServiceUnavailable
                } else {
                    ErrorCode::ExternalServiceError
                };
                AppError::new(code, format!("{SERVICE} request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| {
                AppError::external_service(
                    SERVICE,
                    format!("Failed to read response: {}", e.without_url()),
                )
            })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse response");
                AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(SERVICE, error.message));
        }

        Self::extract_content(&gemini_response)
    }

    /// First text part of the first candidate
    fn extract_content(response: &GeminiResponse) -> AppResult<String> {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| {
                c.parts.iter().find_map(|part| match part {
                    ContentPart::Text { text } => Some(text.clone()),
                    ContentPart::InlineData { .. } => None,
                })
            })
            .ok_or_else(|| AppError::external_service(SERVICE, "No content in response"))
    }

    /// Map an HTTP error status to an application error
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{SERVICE} quota exceeded: {message}"),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE} rejected the API key: {message}"),
            ),
            _ => AppError::external_service(SERVICE, format!("API error ({status}): {message}")),
        }
    }

    /// Parse the model's JSON reply, tolerating a fenced code block
    fn parse_estimate(text: &str) -> AppResult<MealEstimate> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .and_then(|rest| rest.strip_suffix("```"))
            .unwrap_or(trimmed)
            .trim();

        serde_json::from_str(body).map_err(|e| {
            warn!(error = %e, "Meal estimate was not valid JSON");
            AppError::new(
                ErrorCode::ExternalServiceError,
                format!("{SERVICE} returned an unreadable meal estimate: {e}"),
            )
        })
    }
}

#[async_trait]
impl MealAnalyzer for GeminiClient {
    #[instrument(skip(self, image_jpeg_base64, prompt), fields(model = %self.model, image_len = image_jpeg_base64.len()))]
    async fn analyze_meal(
        &self,
        image_jpeg_base64: &str,
        prompt: &str,
    ) -> AppResult<MealEstimate> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    ContentPart::Text {
                        text: prompt.to_owned(),
                    },
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: IMAGE_MIME_TYPE.to_owned(),
                            data: image_jpeg_base64.to_owned(),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: meal_estimate_schema(),
            }),
        };

        debug!("Sending meal analysis request to Gemini API");
        let text = self.generate(&request).await?;
        let estimate = Self::parse_estimate(&text)?;
        debug!(meal = %estimate.meal_name, calories = estimate.total_calories, "Meal analyzed");
        Ok(estimate)
    }
}

#[async_trait]
impl InsightGenerator for GeminiClient {
    #[instrument(skip(self, meal_summary), fields(model = %self.model))]
    async fn meal_insight(
        &self,
        meal_summary: &str,
        daily_goal: i64,
        daily_protein_goal: i64,
    ) -> AppResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart::Text {
                    text: insight_prompt(meal_summary, daily_goal, daily_protein_goal),
                }],
            }],
            generation_config: None,
        };

        debug!("Sending insight request to Gemini API");
        let text = self.generate(&request).await?;
        Ok(text.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_maps_to_rate_limited() {
        let err = GeminiClient::map_api_error(
            429,
            r#"{"error":{"message":"Resource has been exhausted"}}"#,
        );
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert!(err.message.contains("Resource has been exhausted"));
    }

    #[test]
    fn test_url_carries_model_but_not_key() {
        let client = GeminiClient::new(&GeminiConfig {
            api_key: Some("SECRET-KEY-123".to_owned()),
            model: "gemini-test".to_owned(),
            base_url: "https://example.test/v1beta/".to_owned(),
            ..GeminiConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.build_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_unparseable_error_body_is_kept_verbatim() {
        let err = GeminiClient::map_api_error(500, "upstream exploded");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.contains("upstream exploded"));
    }

    #[test]
    fn test_parse_estimate_accepts_fenced_json() {
        let estimate = GeminiClient::parse_estimate(
            "```json\n{\"mealName\":\"Toast\",\"totalCalories\":180,\"totalProtein\":6,\"estimatedWeight\":60}\n```",
        )
        .unwrap();
        assert_eq!(estimate.meal_name, "Toast");
        assert!((estimate.total_calories - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_request_serializes_inline_image_and_schema() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: IMAGE_MIME_TYPE.to_owned(),
                        data: "abc".to_owned(),
                    },
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: meal_estimate_schema(),
            }),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = GeminiClient::new(&GeminiConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig {
            api_key: Some("very-secret".to_owned()),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert!(!format!("{client:?}").contains("very-secret"));
    }
}

//! HTTP estimator backed by an OpenAI-compatible chat-completions endpoint.
//!
//! The meal is rendered into a prompt, the model is asked for a JSON object,
//! and the first choice's content is parsed as an [`EstimateResponse`].

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EstimateError;
use super::protocol::{render_prompt, EstimateRequest, EstimateResponse, SYSTEM_PROMPT};
use super::Estimator;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone)]
pub struct HttpEstimator {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl HttpEstimator {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EstimateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EstimateError::NotConfigured(
                "missing API key (set estimator.api_key or DAILYCAL_API_KEY)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EstimateError::HttpError(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        let base_url = if !self.base_url.starts_with("http://")
            && !self.base_url.starts_with("https://")
        {
            format!("https://{}", self.base_url)
        } else {
            self.base_url.clone()
        };

        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }

    async fn request_estimate(
        &self,
        request: &EstimateRequest,
    ) -> Result<EstimateResponse, EstimateError> {
        if request.food_items.is_empty() {
            return Err(EstimateError::EmptyRequest);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: render_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = self.completions_url();
        tracing::debug!(%url, model = %self.model, items = request.food_items.len(), "requesting estimate");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EstimateError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EstimateError::Status(response.status().as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| EstimateError::HttpError(e.to_string()))?;

        parse_completion(&text)
    }
}

impl Estimator for HttpEstimator {
    fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> impl Future<Output = Result<EstimateResponse, EstimateError>> + Send {
        self.request_estimate(request)
    }
}

/// Extracts the estimate from a chat-completions response body.
fn parse_completion(body: &str) -> Result<EstimateResponse, EstimateError> {
    let chat: ChatResponse =
        serde_json::from_str(body).map_err(|e| EstimateError::Malformed(e.to_string()))?;

    let content = chat
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| EstimateError::Malformed("response has no choices".to_string()))?;

    let estimate: EstimateResponse = serde_json::from_str(strip_code_fence(&content))
        .map_err(|e| EstimateError::Malformed(e.to_string()))?;
    estimate.validate()?;

    Ok(estimate)
}

/// Some models wrap JSON in a markdown fence even when asked not to.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => rest
            .trim_start_matches("json")
            .trim_end()
            .trim_end_matches("```")
            .trim(),
        None => trimmed,
    }
}

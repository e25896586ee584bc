//! HTTP client for an OpenAI-compatible chat completions API.
//!
//! Wraps `reqwest` with bearer authentication, retry on transient failures,
//! and a mock mode that never touches the network.

use std::time::Duration;

use reqwest::{Client, Url};
use vobvoc_core::AppConfig;

use crate::error::ReplyError;
use crate::prompt::{reply_messages, translate_messages};
use crate::retry::retry_with_backoff;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, Tone};

/// Reply returned in mock mode.
pub const MOCK_REPLY: &str = "Thank you for your feedback, and we\u{2019}re sorry to hear about your experience. \
Please reach out to us via Shopee chat with your order details so we can assist you promptly.";

/// Translation returned in mock mode.
pub const MOCK_TRANSLATION: &str =
    "（시뮬레이션 번역）해당 문장은 트러블 피부 진정/가벼운 사용감/집중 케어를 강조합니다.";

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Drafts customer replies and translates them.
///
/// Use [`ReplyClient::from_config`] in the application or
/// [`ReplyClient::with_base_url`] to point at a mock server in tests.
pub struct ReplyClient {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
    model: String,
    mock: bool,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ReplyClient {
    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ReplyError::InvalidBaseUrl`] if the configured base
    /// URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ReplyError> {
        let client = Self::with_base_url(
            config.reply_api_key.as_deref(),
            &config.reply_model,
            config.reply_timeout_secs,
            &config.reply_base_url,
        )?;
        Ok(client.with_mock(config.reply_mock))
    }

    /// Creates a client against `base_url` (for example `https://api.openai.com/v1`).
    ///
    /// A missing or blank `api_key` puts the client in mock mode.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ReplyError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ReplyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vobvoc/0.1 (review-replies)")
            .build()?;

        // Exactly one trailing slash, so the join appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| ReplyError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            endpoint,
            model: model.to_owned(),
            mock: false,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Forces canned responses when `mock` is `true`.
    #[must_use]
    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// Overrides the retry policy for transient failures.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Returns `true` when calls return canned text instead of calling the API.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        self.mock || self.api_key.is_none()
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Drafts a reply to `review_text`.
    ///
    /// # Errors
    ///
    /// - [`ReplyError::Http`] on network failure.
    /// - [`ReplyError::Status`] when the API answers with a non-success status.
    /// - [`ReplyError::Deserialize`] if the body is not a completion.
    /// - [`ReplyError::EmptyCompletion`] if the completion has no text.
    pub async fn try_generate_reply(
        &self,
        review_text: &str,
        issue_detail: Option<&str>,
        tone: Tone,
    ) -> Result<String, ReplyError> {
        if self.is_mock() {
            return Ok(MOCK_REPLY.to_owned());
        }
        self.complete(&reply_messages(review_text, issue_detail, tone))
            .await
    }

    /// Drafts a reply, reporting any failure inline as `"Error: <message>"`.
    pub async fn generate_reply(
        &self,
        review_text: &str,
        issue_detail: Option<&str>,
        tone: Tone,
    ) -> String {
        match self.try_generate_reply(review_text, issue_detail, tone).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "reply generation failed");
                format!("Error: {e}")
            }
        }
    }

    /// Translates `text` into Korean.
    ///
    /// # Errors
    ///
    /// Same as [`ReplyClient::try_generate_reply`].
    pub async fn try_translate(&self, text: &str) -> Result<String, ReplyError> {
        if self.is_mock() {
            return Ok(MOCK_TRANSLATION.to_owned());
        }
        self.complete(&translate_messages(text)).await
    }

    /// Translates `text`, reporting any failure inline as `"Error: <message>"`.
    pub async fn translate(&self, text: &str) -> String {
        match self.try_translate(text).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, "translation failed");
                format!("Error: {e}")
            }
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ReplyError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
        };
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.complete_once(&request)
        })
        .await
    }

    /// Sends one completion request and extracts the first choice's text.
    async fn complete_once(&self, request: &ChatRequest<'_>) -> Result<String, ReplyError> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ReplyError::Status {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ReplyError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;
        let text = parsed.first_text().ok_or(ReplyError::EmptyCompletion)?;
        tracing::debug!(model = %self.model, chars = text.chars().count(), "completion received");
        Ok(text)
    }
}

/// `error.message` from an API error body, or the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned())
}

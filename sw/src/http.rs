//! reqwest implementation of the SlackApi trait
//!
//! Every method is a JSON POST to `{base_url}/{method}` with a bearer
//! token. Slack replies HTTP 200 with `{"ok": false, "error": "..."}` on
//! logical failure, so success requires both a 2xx status and `ok: true`.
//!
//! Calls are single-attempt: a failed render or send is terminal for the
//! invocation that made it, and the surrounding workflow never retries.
//! The client timeout bounds every call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::blocks::{Block, View};
use crate::client::SlackApi;
use crate::error::SlackError;

/// Slack Web API client over HTTPS
pub struct HttpSlackClient {
    token: String,
    base_url: String,
    http: Client,
}

impl HttpSlackClient {
    /// Create a client with the given bot token and request timeout
    ///
    /// `base_url` is normally `https://slack.com/api`; tests point it at a
    /// local server.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self, SlackError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            token: token.into(),
            base_url: base_url.into(),
            http,
        })
    }

    /// Build the request body for `views.open`
    fn build_views_open_body(trigger_id: &str, view: &View) -> serde_json::Value {
        serde_json::json!({
            "trigger_id": trigger_id,
            "view": view,
        })
    }

    /// Build the request body for `conversations.open`
    fn build_conversations_open_body(user_id: &str) -> serde_json::Value {
        serde_json::json!({ "users": user_id })
    }

    /// Build the request body for `chat.postMessage`
    fn build_post_message_body(channel_id: &str, text: &str, blocks: &[Block]) -> serde_json::Value {
        let mut body = serde_json::json!({
            "channel": channel_id,
            "text": text,
        });
        if !blocks.is_empty() {
            body["blocks"] = serde_json::json!(blocks);
        }
        body
    }

    /// POST one Web API method and check the `ok` flag
    async fn call(&self, method: &'static str, body: serde_json::Value) -> Result<ApiResponse, SlackError> {
        debug!(method, "call: posting to Slack Web API");
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("content-type", "application/json; charset=utf-8")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(method, status, "call: HTTP error");
            return Err(SlackError::Http { method, status });
        }

        let api: ApiResponse = response.json().await?;
        if !api.ok {
            let code = api.error.unwrap_or_else(|| "unknown_error".to_string());
            debug!(method, %code, "call: Slack returned ok=false");
            return Err(SlackError::Api { method, code });
        }

        debug!(method, "call: success");
        Ok(api)
    }
}

#[async_trait]
impl SlackApi for HttpSlackClient {
    async fn views_open(&self, trigger_id: &str, view: &View) -> Result<(), SlackError> {
        let body = Self::build_views_open_body(trigger_id, view);
        self.call("views.open", body).await?;
        Ok(())
    }

    async fn conversations_open(&self, user_id: &str) -> Result<String, SlackError> {
        let body = Self::build_conversations_open_body(user_id);
        let api = self.call("conversations.open", body).await?;

        api.channel.map(|c| c.id).ok_or(SlackError::InvalidResponse {
            method: "conversations.open",
            message: "missing channel in response".to_string(),
        })
    }

    async fn post_message(&self, channel_id: &str, text: &str, blocks: &[Block]) -> Result<(), SlackError> {
        let body = Self::build_post_message_body(channel_id, text, blocks);
        self.call("chat.postMessage", body).await?;
        Ok(())
    }
}

// Web API response envelope - one shape covers all three methods since the
// extra fields are optional

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<ChannelRef>,
}

#[derive(Debug, Deserialize)]
struct ChannelRef {
    id: String,
}

//! SlackApi trait definition

use async_trait::async_trait;

use crate::blocks::{Block, View};
use crate::error::SlackError;

/// Stateless Slack Web API surface - each call is independent
///
/// One long-lived handle is created at process start and shared read-only
/// by every event handler thereafter. Implementations hold credentials and
/// a connection pool, never per-call state, so any number of invocations
/// may use the same handle concurrently.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Render a modal view against a short-lived trigger id
    ///
    /// The trigger id is only valid for a few seconds after the user
    /// invocation that produced it.
    async fn views_open(&self, trigger_id: &str, view: &View) -> Result<(), SlackError>;

    /// Open (or reuse) a direct-message channel with a user
    ///
    /// Returns the channel id. Slack reuses the existing DM channel if one
    /// is already open, so calling this repeatedly is safe.
    async fn conversations_open(&self, user_id: &str) -> Result<String, SlackError>;

    /// Post a message into a channel
    ///
    /// `text` is the notification/fallback rendering; `blocks` may be empty
    /// for plain-text messages.
    async fn post_message(&self, channel_id: &str, text: &str, blocks: &[Block]) -> Result<(), SlackError>;
}

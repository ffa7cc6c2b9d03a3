//! Inbound event handlers
//!
//! One handler per envelope kind, dispatched by [`dispatch`] after the
//! gateway has acked the envelope. Handlers never escalate failures to
//! the process: every error terminates its own invocation with a log
//! line, leaving no residual state and no user-visible message.

mod action;
mod command;
mod submission;

pub use action::handle_block_actions;
pub use command::{APPROVAL_MODAL, approval_modal, handle_slash_command};
pub use submission::{handle_view_submission, request_blocks};

use slackweb::{SlackApi, SlackError};
use thiserror::Error;
use tracing::error;

use crate::events::{EventError, EventPayload};

/// Errors terminal to a single invocation
#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    Slack(#[from] SlackError),

    #[error(transparent)]
    Event(#[from] EventError),
}

/// Dispatch one acked envelope payload to its handler
///
/// All handler failures end here: logged and dropped. The process keeps
/// serving other events regardless of what happens to this one.
pub async fn dispatch(api: &dyn SlackApi, payload: EventPayload) {
    let kind = payload.kind();

    let result = match payload {
        EventPayload::SlashCommands(cmd) => handle_slash_command(api, &cmd).await,
        EventPayload::ViewSubmission(submission) => handle_view_submission(api, &submission).await,
        EventPayload::BlockActions(actions) => handle_block_actions(api, &actions).await,
    };

    if let Err(e) = result {
        error!(kind, error = %e, "dispatch: handler failed, dropping invocation");
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use slackweb::{Block, SlackApi, SlackError, View};

    /// One recorded chat.postMessage call
    #[derive(Debug, Clone)]
    pub struct SentMessage {
        pub channel: String,
        pub text: String,
        pub blocks: Vec<Block>,
    }

    /// Mock Slack client for handler tests
    ///
    /// Records every call. DM channels are derived as `D-<user>` so tests
    /// can assert delivery targets. Individual methods can be scripted to
    /// fail.
    #[derive(Default)]
    pub struct MockSlack {
        pub opened_views: Mutex<Vec<(String, View)>>,
        pub messages: Mutex<Vec<SentMessage>>,
        pub fail_views_open: bool,
        pub fail_conversations_open: bool,
        pub fail_post_message: bool,
    }

    impl MockSlack {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sent(&self) -> Vec<SentMessage> {
            self.messages.lock().unwrap().clone()
        }

        pub fn views(&self) -> Vec<(String, View)> {
            self.opened_views.lock().unwrap().clone()
        }

        /// The DM channel id this mock assigns to a user
        pub fn dm_channel(user_id: &str) -> String {
            format!("D-{user_id}")
        }

        fn failure(method: &'static str) -> SlackError {
            SlackError::Api {
                method,
                code: "mock_failure".to_string(),
            }
        }
    }

    #[async_trait]
    impl SlackApi for MockSlack {
        async fn views_open(&self, trigger_id: &str, view: &View) -> Result<(), SlackError> {
            if self.fail_views_open {
                return Err(Self::failure("views.open"));
            }
            self.opened_views
                .lock()
                .unwrap()
                .push((trigger_id.to_string(), view.clone()));
            Ok(())
        }

        async fn conversations_open(&self, user_id: &str) -> Result<String, SlackError> {
            if self.fail_conversations_open {
                return Err(Self::failure("conversations.open"));
            }
            Ok(Self::dm_channel(user_id))
        }

        async fn post_message(&self, channel_id: &str, text: &str, blocks: &[Block]) -> Result<(), SlackError> {
            if self.fail_post_message {
                return Err(Self::failure("chat.postMessage"));
            }
            self.messages.lock().unwrap().push(SentMessage {
                channel: channel_id.to_string(),
                text: text.to_string(),
                blocks: blocks.to_vec(),
            });
            Ok(())
        }
    }
}

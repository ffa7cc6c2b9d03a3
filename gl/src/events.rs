//! Inbound event types
//!
//! The platform relay delivers events as JSON envelopes, one per line, in
//! Slack Socket Mode shape: `{"envelope_id", "type", "payload"}`. These
//! types are the vocabulary of everything the bot reacts to.
//!
//! Slack's view-submission state is keyed by block id then action id and
//! is loosely typed on the wire; [`SubmittedForm::from_state`] maps it to
//! an explicit typed structure at the boundary, failing fast on shape
//! mismatch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors decoding inbound events or control payloads
#[derive(Debug, Error)]
pub enum EventError {
    /// The envelope or payload body was not valid JSON of the expected shape
    #[error("Malformed event payload: {0}")]
    Payload(#[source] serde_json::Error),

    /// A field the workflow depends on was absent or of the wrong type
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// One platform envelope, as delivered by the relay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub envelope_id: String,

    #[serde(flatten)]
    pub payload: EventPayload,
}

/// The event payloads this bot handles
///
/// Tagged exactly as on the wire: `type` names the kind, `payload` holds
/// the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EventPayload {
    /// A user invoked the slash command
    SlashCommands(SlashCommand),

    /// A user submitted the modal form
    ViewSubmission(ViewSubmission),

    /// A user activated an interactive control on a sent message
    BlockActions(BlockActions),
}

impl EventPayload {
    /// Envelope kind string, as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            EventPayload::SlashCommands(_) => "slash_commands",
            EventPayload::ViewSubmission(_) => "view_submission",
            EventPayload::BlockActions(_) => "block_actions",
        }
    }
}

/// A command invocation: the trigger token plus the invoking user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlashCommand {
    pub trigger_id: String,
    pub user_id: String,
    pub command: String,

    #[serde(default)]
    pub text: String,
}

/// A modal submission: the submitting user plus the view state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewSubmission {
    pub user: UserRef,
    pub view: SubmittedView,
}

/// User reference as nested in interactive payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
}

/// The submitted view: callback id plus the loosely-keyed state map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedView {
    pub callback_id: String,
    pub state: ViewState,
}

/// Raw `state` object; `values` stays untyped until mapped at the boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewState {
    pub values: serde_json::Value,
}

/// A control activation: the activating user plus the fired actions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockActions {
    pub user: UserRef,

    #[serde(default)]
    pub actions: Vec<ActionInvocation>,
}

/// One fired action: its id and the opaque value attached at send time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionInvocation {
    pub action_id: String,

    #[serde(default)]
    pub value: Option<String>,
}

/// Typed result of mapping the modal's submitted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedForm {
    pub approver: String,
    pub text: String,
}

impl SubmittedForm {
    /// Map `state.values` into the typed form
    ///
    /// Slack keys the state by block id, then action id:
    /// `values.approver_select.approver.selected_user` and
    /// `values.approval_text.text.value`. Any shape mismatch is a decode
    /// failure for the invocation.
    pub fn from_state(values: &serde_json::Value) -> Result<Self, EventError> {
        let approver = values
            .pointer("/approver_select/approver/selected_user")
            .and_then(|v| v.as_str())
            .ok_or(EventError::MissingField("approver_select.approver.selected_user"))?;

        let text = values
            .pointer("/approval_text/text/value")
            .and_then(|v| v.as_str())
            .ok_or(EventError::MissingField("approval_text.text.value"))?;

        Ok(Self {
            approver: approver.to_string(),
            text: text.to_string(),
        })
    }
}

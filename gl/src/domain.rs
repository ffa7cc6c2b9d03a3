//! Approval workflow value objects
//!
//! There is no store of pending requests: the button payload is the only
//! carrier of cross-event context, so [`ActionPayload`] must round-trip
//! the requester identity and request text exactly. Losing either breaks
//! the workflow irrecoverably for that request.

use serde::{Deserialize, Serialize};

use crate::events::EventError;

/// Action id carried by the Approve button
pub const APPROVE_ACTION: &str = "approve";

/// Action id carried by the Reject button
pub const REJECT_ACTION: &str = "reject";

/// A single approval request
///
/// Lives only for the duration of the dispatching invocation; after the
/// DM is sent its only remnants are the rendered message and the button
/// payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub requester: String,
    pub approver: String,
    pub text: String,
}

/// The outcome of a decision button press
///
/// Not an explicit wire object - derived from which action id fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Map a block action id to a decision
    ///
    /// Action ids this workflow does not own map to `None`.
    pub fn from_action_id(action_id: &str) -> Option<Self> {
        match action_id {
            APPROVE_ACTION => Some(Decision::Approved),
            REJECT_ACTION => Some(Decision::Rejected),
            _ => None,
        }
    }

    /// The action id a button for this decision carries
    pub fn action_id(&self) -> &'static str {
        match self {
            Decision::Approved => APPROVE_ACTION,
            Decision::Rejected => REJECT_ACTION,
        }
    }

    /// The notification text sent to the requester for this decision
    pub fn notification(&self) -> &'static str {
        match self {
            Decision::Approved => "Your approval request has been *approved*!",
            Decision::Rejected => "Your approval request has been *rejected*.",
        }
    }
}

/// Context embedded in each decision button, returned verbatim on
/// activation
///
/// Wire format is JSON with the `approvalText` field name:
/// `{"requester":"U123","approvalText":"..."}`. Both decision buttons on
/// a message carry the same payload; only the action id differs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionPayload {
    pub requester: String,

    #[serde(rename = "approvalText")]
    pub approval_text: String,
}

impl ActionPayload {
    pub fn new(requester: impl Into<String>, approval_text: impl Into<String>) -> Self {
        Self {
            requester: requester.into(),
            approval_text: approval_text.into(),
        }
    }

    /// Serialize for embedding in a button `value`
    pub fn encode(&self) -> Result<String, EventError> {
        serde_json::to_string(self).map_err(EventError::Payload)
    }

    /// Decode a button `value` back into the payload
    ///
    /// Malformed JSON or a missing field is the terminal `payload decode
    /// failure` for that invocation.
    pub fn decode(value: &str) -> Result<Self, EventError> {
        serde_json::from_str(value).map_err(EventError::Payload)
    }
}

//! Greenlight - Slack approval workflow bot
//!
//! A slash command opens a modal asking for an approver and a request
//! text. Submitting the form sends the approver a direct message with
//! Approve/Reject buttons, and pressing a button notifies the requester
//! of the outcome.
//!
//! # Core Concepts
//!
//! - **No stored state**: each button carries its full context as an
//!   opaque payload, round-tripped through the platform. There is no
//!   record of pending or resolved requests.
//! - **Ack first**: every inbound envelope is acknowledged before its
//!   handler runs; handler latency never eats into the platform's
//!   delivery window.
//! - **Silent failure**: a failed outbound call ends that invocation with
//!   a log line and nothing else. No retry, no user-facing error, no
//!   effect on other invocations.
//!
//! # Modules
//!
//! - [`events`] - inbound envelope and payload types
//! - [`gateway`] - JSON-lines listener and ack for the platform relay
//! - [`handlers`] - one handler per envelope kind
//! - [`domain`] - approval request, decision, button payload
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod events;
pub mod gateway;
pub mod handlers;

// Re-export commonly used types
pub use config::{Config, GatewayConfig, SlackConfig};
pub use domain::{ActionPayload, ApprovalRequest, Decision};
pub use events::{
    ActionInvocation, BlockActions, Envelope, EventError, EventPayload, SlashCommand, SubmittedForm, ViewSubmission,
};
pub use handlers::{HandleError, dispatch};

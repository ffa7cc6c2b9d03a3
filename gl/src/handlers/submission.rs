//! Dispatcher: form submission becomes a DM to the chosen approver
//!
//! The sent message is the request's only representation from here on:
//! human-readable text plus two buttons whose payloads carry everything
//! the decision handler will need.

use slackweb::{Block, BlockElement, ButtonStyle, SlackApi, Text};
use tracing::{debug, info};

use super::HandleError;
use super::command::APPROVAL_MODAL;
use crate::domain::{ActionPayload, ApprovalRequest, Decision};
use crate::events::{SubmittedForm, ViewSubmission};

/// Render the approver-facing message blocks for a request
///
/// Both buttons carry the same payload; they differ only in action id and
/// styling (affirmative vs destructive).
pub fn request_blocks(request: &ApprovalRequest) -> Result<Vec<Block>, HandleError> {
    let payload = ActionPayload::new(&request.requester, &request.text).encode()?;

    Ok(vec![
        Block::Section {
            text: Text::mrkdwn(format!(
                "*Approval Request*\n> {}\nFrom: <@{}>",
                request.text, request.requester
            )),
        },
        Block::Actions {
            elements: vec![
                BlockElement::button(
                    "Approve",
                    Decision::Approved.action_id(),
                    ButtonStyle::Primary,
                    payload.clone(),
                ),
                BlockElement::button("Reject", Decision::Rejected.action_id(), ButtonStyle::Danger, payload),
            ],
        },
    ])
}

/// Forward a submitted request to the chosen approver's DM channel
///
/// The approver may be the requester; the request then lands in their own
/// DM channel. Channel-open or send failures are terminal for this
/// invocation and invisible to the requester.
pub async fn handle_view_submission(api: &dyn SlackApi, submission: &ViewSubmission) -> Result<(), HandleError> {
    if submission.view.callback_id != APPROVAL_MODAL {
        debug!(callback_id = %submission.view.callback_id, "handle_view_submission: not ours, ignoring");
        return Ok(());
    }

    let form = SubmittedForm::from_state(&submission.view.state.values)?;
    let request = ApprovalRequest {
        requester: submission.user.id.clone(),
        approver: form.approver,
        text: form.text,
    };
    debug!(
        requester = %request.requester,
        approver = %request.approver,
        "handle_view_submission: dispatching request"
    );

    let blocks = request_blocks(&request)?;
    let channel = api.conversations_open(&request.approver).await?;
    let fallback = format!("Approval request from <@{}>: {}", request.requester, request.text);
    api.post_message(&channel, &fallback, &blocks).await?;

    info!(
        requester = %request.requester,
        approver = %request.approver,
        %channel,
        "approval request dispatched"
    );
    Ok(())
}

//! Decision Handler: a button press notifies the original requester
//!
//! The button payload is the handler's only source of context - there is
//! no lookup of the original request, no check that the activator is the
//! intended approver, and no record of the decision. Activating both
//! buttons, or one button twice, sends one notification per activation.

use slackweb::SlackApi;
use tracing::{debug, info};

use super::HandleError;
use crate::domain::{ActionPayload, Decision};
use crate::events::{BlockActions, EventError};

/// Deliver the decision to the requester named in the button payload
pub async fn handle_block_actions(api: &dyn SlackApi, actions: &BlockActions) -> Result<(), HandleError> {
    // One activation carries one pressed button; find the first action id
    // this workflow owns.
    let Some((decision, invocation)) = actions
        .actions
        .iter()
        .find_map(|a| Decision::from_action_id(&a.action_id).map(|d| (d, a)))
    else {
        debug!("handle_block_actions: no recognized action id, ignoring");
        return Ok(());
    };

    let value = invocation
        .value
        .as_deref()
        .ok_or(EventError::MissingField("action.value"))?;
    let payload = ActionPayload::decode(value)?;

    debug!(
        ?decision,
        requester = %payload.requester,
        activator = %actions.user.id,
        "handle_block_actions: notifying requester"
    );

    let channel = api.conversations_open(&payload.requester).await?;
    api.post_message(&channel, decision.notification(), &[]).await?;

    info!(?decision, requester = %payload.requester, "decision delivered");
    Ok(())
}

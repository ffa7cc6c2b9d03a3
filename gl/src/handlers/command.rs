//! Form Presenter: slash command invocation opens the request modal

use slackweb::{Block, BlockElement, SlackApi, Text, View};
use tracing::debug;

use super::HandleError;
use crate::events::SlashCommand;

/// Callback id of the request modal, echoed back on submission
pub const APPROVAL_MODAL: &str = "approval_modal";

// Block and action ids keying the submitted form state
pub(crate) const APPROVER_BLOCK: &str = "approver_select";
pub(crate) const APPROVER_ACTION: &str = "approver";
pub(crate) const TEXT_BLOCK: &str = "approval_text";
pub(crate) const TEXT_ACTION: &str = "text";

/// Build the approval request modal: an approver picker and a multiline
/// text field, both required
pub fn approval_modal() -> View {
    View::modal(
        APPROVAL_MODAL,
        "Approval Request",
        "Submit",
        "Cancel",
        vec![
            Block::Input {
                block_id: APPROVER_BLOCK.to_string(),
                element: BlockElement::UsersSelect {
                    action_id: APPROVER_ACTION.to_string(),
                },
                label: Text::plain("Select Approver"),
            },
            Block::Input {
                block_id: TEXT_BLOCK.to_string(),
                element: BlockElement::PlainTextInput {
                    action_id: TEXT_ACTION.to_string(),
                    multiline: true,
                },
                label: Text::plain("Approval Text"),
            },
        ],
    )
}

/// Ask the platform to render the request modal for this invocation
///
/// The trigger id expires within seconds; the gateway has already acked
/// the envelope, so this render call is the only remaining work. A
/// failure means the user sees no form and no request is created.
pub async fn handle_slash_command(api: &dyn SlackApi, cmd: &SlashCommand) -> Result<(), HandleError> {
    debug!(user = %cmd.user_id, command = %cmd.command, "handle_slash_command: opening modal");

    api.views_open(&cmd.trigger_id, &approval_modal()).await?;

    debug!(user = %cmd.user_id, "handle_slash_command: modal render requested");
    Ok(())
}

//! Block Kit surface types
//!
//! Covers the subset of Slack's Block Kit this workspace renders: a modal
//! view with input blocks, and message blocks with section text and
//! buttons. Serialization matches Slack's wire format exactly, so these
//! types can be posted to the Web API as-is.

use serde::{Deserialize, Serialize};

/// A text object, either plain text or Slack's mrkdwn dialect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String },

    #[serde(rename = "mrkdwn")]
    Mrkdwn { text: String },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Text::Mrkdwn { text: text.into() }
    }
}

/// Button styling
///
/// Slack omits the `style` field entirely for default styling, which is
/// why [`BlockElement::Button`] carries an `Option<ButtonStyle>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// An interactive or input element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum BlockElement {
    /// Single-user picker for modal input blocks
    #[serde(rename = "users_select")]
    UsersSelect { action_id: String },

    /// Free-text input for modal input blocks
    #[serde(rename = "plain_text_input")]
    PlainTextInput { action_id: String, multiline: bool },

    /// A button; `value` is returned verbatim when the button is activated
    #[serde(rename = "button")]
    Button {
        text: Text,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

impl BlockElement {
    /// A button with style and payload value
    pub fn button(
        label: impl Into<String>,
        action_id: impl Into<String>,
        style: ButtonStyle,
        value: impl Into<String>,
    ) -> Self {
        BlockElement::Button {
            text: Text::plain(label),
            action_id: action_id.into(),
            style: Some(style),
            value: Some(value.into()),
        }
    }
}

/// A layout block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Block {
    /// A text section
    #[serde(rename = "section")]
    Section { text: Text },

    /// A row of interactive elements
    #[serde(rename = "actions")]
    Actions { elements: Vec<BlockElement> },

    /// A labelled form input; `block_id` keys the submitted state
    #[serde(rename = "input")]
    Input {
        block_id: String,
        element: BlockElement,
        label: Text,
    },
}

/// A modal view for `views.open`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct View {
    #[serde(rename = "type")]
    pub kind: String,
    pub callback_id: String,
    pub title: Text,
    pub submit: Text,
    pub close: Text,
    pub blocks: Vec<Block>,
}

impl View {
    /// A modal view; `callback_id` is echoed back on submission
    pub fn modal(
        callback_id: impl Into<String>,
        title: impl Into<String>,
        submit: impl Into<String>,
        close: impl Into<String>,
        blocks: Vec<Block>,
    ) -> Self {
        Self {
            kind: "modal".to_string(),
            callback_id: callback_id.into(),
            title: Text::plain(title),
            submit: Text::plain(submit),
            close: Text::plain(close),
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_serializes_with_type_tag() {
        let plain = serde_json::to_value(Text::plain("Approve")).unwrap();
        assert_eq!(plain, serde_json::json!({"type": "plain_text", "text": "Approve"}));

        let mrkdwn = serde_json::to_value(Text::mrkdwn("*bold*")).unwrap();
        assert_eq!(mrkdwn, serde_json::json!({"type": "mrkdwn", "text": "*bold*"}));
    }

    #[test]
    fn test_button_wire_format() {
        let button = BlockElement::button("Approve", "approve", ButtonStyle::Primary, r#"{"k":"v"}"#);
        let json = serde_json::to_value(&button).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "button",
                "text": {"type": "plain_text", "text": "Approve"},
                "action_id": "approve",
                "style": "primary",
                "value": r#"{"k":"v"}"#,
            })
        );
    }

    #[test]
    fn test_button_without_style_omits_field() {
        let button = BlockElement::Button {
            text: Text::plain("Dismiss"),
            action_id: "dismiss".to_string(),
            style: None,
            value: None,
        };
        let json = serde_json::to_value(&button).unwrap();

        assert!(json.get("style").is_none());
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_section_block_wire_format() {
        let block = Block::Section {
            text: Text::mrkdwn("*Approval Request*"),
        };
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["type"], "section");
        assert_eq!(json["text"]["type"], "mrkdwn");
    }

    #[test]
    fn test_input_block_wire_format() {
        let block = Block::Input {
            block_id: "approval_text".to_string(),
            element: BlockElement::PlainTextInput {
                action_id: "text".to_string(),
                multiline: true,
            },
            label: Text::plain("Approval Text"),
        };
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "input",
                "block_id": "approval_text",
                "element": {"type": "plain_text_input", "action_id": "text", "multiline": true},
                "label": {"type": "plain_text", "text": "Approval Text"},
            })
        );
    }

    #[test]
    fn test_modal_view_wire_format() {
        let view = View::modal("approval_modal", "Approval Request", "Submit", "Cancel", vec![]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["type"], "modal");
        assert_eq!(json["callback_id"], "approval_modal");
        assert_eq!(json["title"], serde_json::json!({"type": "plain_text", "text": "Approval Request"}));
        assert_eq!(json["submit"]["text"], "Submit");
        assert_eq!(json["close"]["text"], "Cancel");
        assert_eq!(json["blocks"], serde_json::json!([]));
    }

    #[test]
    fn test_blocks_roundtrip() {
        let blocks = vec![
            Block::Section {
                text: Text::mrkdwn("hello".to_string()),
            },
            Block::Actions {
                elements: vec![BlockElement::button("Reject", "reject", ButtonStyle::Danger, "{}")],
            },
        ];

        let json = serde_json::to_string(&blocks).unwrap();
        let parsed: Vec<Block> = serde_json::from_str(&json).unwrap();
        assert_eq!(blocks, parsed);
    }
}

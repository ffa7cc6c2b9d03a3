//! Slack Web API client
//!
//! A small typed surface over the Web API methods an interactive workflow
//! bot needs: `views.open`, `conversations.open`, and `chat.postMessage`,
//! plus the Block Kit types those methods accept.
//!
//! The [`SlackApi`] trait is the seam: the bot holds one `Arc<dyn SlackApi>`
//! created at startup and every handler calls it statelessly. The reqwest
//! implementation lives in [`HttpSlackClient`].
//!
//! # Modules
//!
//! - [`client`] - SlackApi trait definition
//! - [`blocks`] - Block Kit surface types
//! - `http` - reqwest implementation of the trait

pub mod blocks;
pub mod client;
mod error;
mod http;

pub use blocks::{Block, BlockElement, ButtonStyle, Text, View};
pub use client::SlackApi;
pub use error::SlackError;
pub use http::HttpSlackClient;

// Message log rendering for display with per-message decryption fallback.

use crate::domain::crypto::{decrypt, is_encrypted_envelope};
use crate::domain::{Message, MessagePriority};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Shown in place of content that cannot be decrypted.
pub const UNREADABLE_PLACEHOLDER: &str = "[unable to decrypt]";

/// A message prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub sender_id: String,
    pub sender_callsign: String,
    pub content: String,
    pub timestamp: u64,
    pub priority: MessagePriority,
    pub acknowledged: bool,
    pub delivered_to: BTreeSet<String>,
    /// True when the stored content looked like an envelope.
    pub encrypted: bool,
    /// True when `content` holds usable text (plaintext or decrypted).
    pub readable: bool,
}

/// Renders messages, decrypting envelopes with `password`.
///
/// A failure on one message only replaces that message's content with
/// [`UNREADABLE_PLACEHOLDER`]; the rest of the log is unaffected.
pub fn render_messages(messages: &[Message], password: Option<&str>) -> Vec<MessageView> {
    messages
        .iter()
        .map(|message| render_message(message, password))
        .collect()
}

fn render_message(message: &Message, password: Option<&str>) -> MessageView {
    let encrypted = is_encrypted_envelope(&message.content);
    let content = if !encrypted {
        Some(message.content.clone())
    } else {
        match password.filter(|p| !p.is_empty()) {
            Some(password) => decrypt(&message.content, password)
                .inspect_err(|e| {
                    warn!(message_id = %message.id, error = %e, "failed to decrypt message");
                })
                .ok(),
            None => None,
        }
    };

    MessageView {
        id: message.id.clone(),
        sender_id: message.sender_id.clone(),
        sender_callsign: message.sender_callsign.clone(),
        readable: content.is_some(),
        content: content.unwrap_or_else(|| UNREADABLE_PLACEHOLDER.to_string()),
        timestamp: message.timestamp,
        priority: message.priority,
        acknowledged: message.acknowledged,
        delivered_to: message.delivered_to.clone(),
        encrypted,
    }
}

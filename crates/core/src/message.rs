//! Direct messages between portal users.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub sender_id: EntityId,
    pub receiver_id: EntityId,
    pub content: String,
    pub timestamp: Timestamp,
    pub read: bool,
}

impl Message {
    /// Compose an unread message.
    pub fn compose(
        sender_id: &str,
        receiver_id: &str,
        content: &str,
        timestamp: Timestamp,
    ) -> Result<Self, CoreError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CoreError::Validation("Message content must not be empty".into()));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Message must be at most {MAX_MESSAGE_LENGTH} characters"
            )));
        }
        if sender_id == receiver_id {
            return Err(CoreError::Validation("Cannot send a message to yourself".into()));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            timestamp,
            read: false,
        })
    }

    /// Mark the message read on behalf of `reader`.
    ///
    /// Only the receiver may do this. Returns `true` if the flag changed.
    pub fn mark_read(&mut self, reader: &str) -> Result<bool, CoreError> {
        if reader != self.receiver_id {
            return Err(CoreError::Forbidden(
                "Only the receiver can mark a message as read".into(),
            ));
        }
        let changed = !self.read;
        self.read = true;
        Ok(changed)
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

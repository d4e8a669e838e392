//! Repository for direct messages.

use siwes_core::error::CoreError;
use siwes_core::message::Message;

use crate::DataStore;

pub struct MessageRepo;

impl MessageRepo {
    /// Messages sent or received by `user_id`, oldest first.
    pub async fn list_for_user(store: &DataStore, user_id: &str) -> Vec<Message> {
        let data = store.read().await;
        let mut messages: Vec<Message> = data
            .messages
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    pub async fn unread_count(store: &DataStore, user_id: &str) -> usize {
        let data = store.read().await;
        data.messages
            .iter()
            .filter(|m| m.receiver_id == user_id && !m.read)
            .count()
    }

    pub async fn create(store: &DataStore, message: Message) -> Message {
        store.write().await.messages.push(message.clone());
        message
    }

    /// Mark a message read on behalf of `reader`.
    pub async fn mark_read(store: &DataStore, id: &str, reader: &str) -> Result<Message, CoreError> {
        let mut data = store.write().await;
        let message = data
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::not_found("Message", id))?;
        message.mark_read(reader)?;
        Ok(message.clone())
    }
}

use poise::serenity_prelude::{ChannelId, MessageId};
use std::collections::HashMap;
use std::fmt;

use crate::error::{BotError, Result};

/// Opaque identifier of a sign-up sheet, embedded in its button tags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a sheet is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLocation {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// In-memory records keyed by session id
#[derive(Debug)]
pub struct SessionStore<T> {
    sessions: HashMap<SessionId, T>,
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: SessionId, record: T) {
        self.sessions.insert(id, record);
    }

    pub fn get(&self, id: &SessionId) -> Result<&T> {
        self.sessions.get(id).ok_or_else(|| not_found(id))
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Result<&mut T> {
        self.sessions.get_mut(id).ok_or_else(|| not_found(id))
    }

    pub fn remove(&mut self, id: &SessionId) -> Result<T> {
        self.sessions.remove(id).ok_or_else(|| not_found(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &SessionId) -> BotError {
    BotError::SessionNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_tag_safe() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().contains('_'));
    }

    #[test]
    fn test_remove_then_lookup_fails() {
        let mut store = SessionStore::new();
        let id = SessionId::from("abc");
        store.insert(id.clone(), 7);

        assert_eq!(*store.get(&id).unwrap(), 7);
        assert_eq!(store.remove(&id).unwrap(), 7);
        assert!(matches!(
            store.get(&id),
            Err(BotError::SessionNotFound { .. })
        ));
        assert!(store.is_empty());
    }
}

//! Id-keyed cache of raw API records.
//!
//! # Responsibility
//! - Stage user, channel and per-channel message records before they become
//!   model entities.
//!
//! # Invariants
//! - Keys derive from each record's `id` field; re-saving an id replaces the
//!   previous record.
//! - The three mappings are independent: message lists may exist for
//!   channels that were never saved.
//! - Lookups of unknown ids return empty values, never errors.

use crate::model::parse::{record_id, Record};
use log::{debug, info};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Storage {
    users: BTreeMap<String, Record>,
    user_snapshot: Vec<Record>,
    channels: BTreeMap<String, Record>,
    channel_messages: BTreeMap<String, Vec<Record>>,
}

impl Storage {
    pub fn new() -> Self {
        info!("event=storage_init module=storage status=ok");
        Self::default()
    }

    /// Inserts or replaces a user record and refreshes the user snapshot.
    pub fn save_user(&mut self, user: Record) {
        let id = record_id(&user);
        if id.is_empty() {
            debug!("event=storage_save module=storage status=empty_id kind=user");
        }
        self.users.insert(id, user);
        self.user_snapshot = self.users.values().cloned().collect();
    }

    /// Stored user record, or an empty record when unknown.
    pub fn user(&self, id: &str) -> Record {
        self.users.get(id).cloned().unwrap_or_default()
    }

    /// All user records ordered by id.
    pub fn users(&self) -> &[Record] {
        &self.user_snapshot
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn save_channel(&mut self, channel: Record) {
        let id = record_id(&channel);
        if id.is_empty() {
            debug!("event=storage_save module=storage status=empty_id kind=channel");
        }
        self.channels.insert(id, channel);
    }

    /// Stored channel record, or an empty record when unknown.
    pub fn channel(&self, id: &str) -> Record {
        self.channels.get(id).cloned().unwrap_or_default()
    }

    /// All channel records ordered by id.
    pub fn channels(&self) -> Vec<Record> {
        self.channels.values().cloned().collect()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Cached messages of a channel, oldest first; empty when none cached.
    pub fn channel_messages(&self, channel_id: &str) -> Vec<Record> {
        self.channel_messages
            .get(channel_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn channel_messages_exist(&self, channel_id: &str) -> bool {
        self.channel_messages.contains_key(channel_id)
    }

    pub fn set_channel_messages(&mut self, channel_id: &str, messages: Vec<Record>) {
        self.channel_messages.insert(channel_id.to_string(), messages);
    }

    /// Appends one message by rewriting the channel's whole list.
    pub fn append_channel_message(&mut self, channel_id: &str, message: Record) {
        let mut messages = self.channel_messages(channel_id);
        messages.push(message);
        self.set_channel_messages(channel_id, messages);
    }

    /// Drops every cached message list, e.g. before a resync.
    pub fn clear_channel_messages(&mut self) {
        debug!(
            "event=storage_clear module=storage status=ok channels={}",
            self.channel_messages.len()
        );
        self.channel_messages.clear();
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        debug!(
            "event=storage_drop module=storage status=ok users={} channels={}",
            self.users.len(),
            self.channels.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Storage;
    use crate::model::parse::Record;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[test]
    fn snapshot_is_ordered_by_id() {
        let mut storage = Storage::new();
        storage.save_user(record(json!({"id": "U2"})));
        storage.save_user(record(json!({"id": "U1"})));

        let ids: Vec<&str> = storage
            .users()
            .iter()
            .filter_map(|user| user.get("id").and_then(|id| id.as_str()))
            .collect();
        assert_eq!(ids, vec!["U1", "U2"]);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let mut storage = Storage::new();
        storage.save_channel(record(json!({"id": 7, "name": "numbers"})));
        assert_eq!(storage.channel("7")["name"], "numbers");
    }

    #[test]
    fn unknown_ids_return_empty_values() {
        let storage = Storage::new();
        assert!(storage.user("U404").is_empty());
        assert!(storage.channel("C404").is_empty());
        assert!(storage.channel_messages("C404").is_empty());
        assert!(!storage.channel_messages_exist("C404"));
    }

    #[test]
    fn clear_channel_messages_keeps_users_and_channels() {
        let mut storage = Storage::new();
        storage.save_user(record(json!({"id": "U1"})));
        storage.save_channel(record(json!({"id": "C1"})));
        storage.append_channel_message("C1", record(json!({"text": "hi"})));

        storage.clear_channel_messages();

        assert!(!storage.channel_messages_exist("C1"));
        assert_eq!(storage.user_count(), 1);
        assert_eq!(storage.channel_count(), 1);
    }
}

//! Client session: one cache plus the models fed from it.
//!
//! # Invariants
//! - A session owns exactly one `Storage`, created and dropped with it.
//! - Loading is incremental: ids already present in a model are skipped.
//! - Chats only hold weak references to users owned by `UsersModel`.

use crate::list::chats_model::ChatsModel;
use crate::list::users_model::UsersModel;
use crate::model::chat::Chat;
use crate::model::message::Message;
use crate::model::parse::{read_array, record_id, Record};
use crate::model::user::{Presence, UserDirectory, UserRef};
use crate::storage::Storage;
use log::{debug, info, warn};
use serde_json::Value;

#[derive(Debug)]
pub struct Session {
    storage: Storage,
    users: UsersModel,
    chats: ChatsModel,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        info!("event=session_init module=service status=ok");
        Self {
            storage: Storage::new(),
            users: UsersModel::new(),
            chats: ChatsModel::new(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn users(&self) -> &UsersModel {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UsersModel {
        &mut self.users
    }

    pub fn chats(&self) -> &ChatsModel {
        &self.chats
    }

    pub fn chats_mut(&mut self) -> &mut ChatsModel {
        &mut self.chats
    }

    pub fn cache_users(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.storage.save_user(record);
        }
    }

    pub fn cache_channels(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.storage.save_channel(record);
        }
    }

    pub fn cache_channel_messages(&mut self, channel_id: &str, records: Vec<Record>) {
        self.storage.set_channel_messages(channel_id, records);
    }

    /// Moves cached users that the model does not know yet into it as one
    /// batch. Records without a usable id stay in the cache. Returns how many
    /// rows were added.
    pub fn load_users(&mut self) -> usize {
        let pending: Vec<Value> = self
            .storage
            .users()
            .iter()
            .filter(|record| {
                let user_id = record_id(record);
                !user_id.is_empty() && !self.users.contains(&user_id)
            })
            .cloned()
            .map(Value::Object)
            .collect();
        let added = self.users.add_users(&pending).len();
        info!(
            "event=users_load module=service status=ok cached={} added={}",
            self.storage.user_count(),
            added
        );
        added
    }

    /// Builds chats for cached channels not loaded yet, with members and
    /// cached messages resolved against the users model.
    pub fn load_chats(&mut self) -> usize {
        let mut added = 0;
        for record in self.storage.channels() {
            let chat_id = record_id(&record);
            if chat_id.is_empty() || self.chats.contains(&chat_id) {
                continue;
            }

            let mut chat = Chat::create(&record);
            chat.set_members(member_refs(&record, &self.users, &chat_id));
            for message in self.storage.channel_messages(&chat_id) {
                chat.messages_mut().add_message(Message::create(&message, &self.users));
            }
            self.chats.add_chat(chat);
            added += 1;
        }
        info!(
            "event=chats_load module=service status=ok cached={} added={}",
            self.storage.channel_count(),
            added
        );
        added
    }

    /// Applies a presence string from the network layer. Returns whether a
    /// change notification fired.
    pub fn apply_presence(&mut self, user_id: &str, presence: &str) -> bool {
        let presence = Presence::parse(presence).unwrap_or_else(|issue| {
            warn!(
                "event=presence_update module=service status=degraded user_id={} issue={}",
                user_id, issue
            );
            Presence::Unknown
        });
        self.users.set_presence(user_id, presence)
    }

    /// Caches a new message and, when its chat is loaded, shows it.
    ///
    /// Returns `true` when the message reached a chat model.
    pub fn post_message(&mut self, channel_id: &str, record: Record) -> bool {
        self.storage.append_channel_message(channel_id, record.clone());
        let Some(chat) = self.chats.chat_mut(channel_id) else {
            debug!(
                "event=message_post module=service status=cached_only channel_id={}",
                channel_id
            );
            return false;
        };
        chat.messages_mut().add_message(Message::create(&record, &self.users));
        true
    }

    /// Drops cached message lists so they are refetched.
    pub fn resync(&mut self) {
        self.storage.clear_channel_messages();
    }
}

fn member_refs(record: &Record, users: &UsersModel, chat_id: &str) -> Vec<UserRef> {
    let Ok(members) = read_array(record, "members") else {
        return Vec::new();
    };
    members
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|user_id| {
            let member = users.user_ref(user_id);
            if member.is_none() {
                debug!(
                    "event=chat_member_link module=service status=unknown_user chat_id={} user_id={}",
                    chat_id, user_id
                );
            }
            member
        })
        .collect()
}

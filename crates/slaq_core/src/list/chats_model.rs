//! List model of channels, groups and conversations.

use crate::list::observer::{ListModel, ModelObserver, ModelValue};
use crate::list::role::Role;
use crate::list::rows::RowStore;
use crate::model::chat::Chat;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Id,
    Type,
    Name,
    IsOpen,
    LastReadId,
    UnreadCount,
    MembersModel,
    MessagesModel,
}

impl Role for ChatRole {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Type,
        Self::Name,
        Self::IsOpen,
        Self::LastReadId,
        Self::UnreadCount,
        Self::MembersModel,
        Self::MessagesModel,
    ];

    fn id(self) -> i32 {
        self as i32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Type => "Type",
            Self::Name => "Name",
            Self::IsOpen => "IsOpen",
            Self::LastReadId => "LastReadId",
            Self::UnreadCount => "UnreadCount",
            Self::MembersModel => "MembersModel",
            Self::MessagesModel => "MessagesModel",
        }
    }
}

#[derive(Debug)]
pub struct ChatsModel {
    rows: RowStore<Chat>,
    // chat id -> latest row holding it
    index: HashMap<String, usize>,
}

impl Default for ChatsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatsModel {
    pub fn new() -> Self {
        Self {
            rows: RowStore::new("chats"),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a chat. Duplicate ids are not checked here.
    pub fn add_chat(&mut self, chat: Chat) {
        let chat_id = chat.id().to_string();
        let range = self.rows.push(chat);
        if !chat_id.is_empty() {
            self.index.insert(chat_id, range.start);
        }
    }

    /// Row of the latest chat with `chat_id`.
    pub fn row_of(&self, chat_id: &str) -> Option<usize> {
        self.index.get(chat_id).copied()
    }

    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.rows.at(self.row_of(chat_id)?)
    }

    /// Mutable access for membership and message updates; the row itself
    /// keeps its position and its id.
    pub fn chat_mut(&mut self, chat_id: &str) -> Option<&mut Chat> {
        let row = self.row_of(chat_id)?;
        self.rows.at_mut(row)
    }

    pub fn contains(&self, chat_id: &str) -> bool {
        self.index.contains_key(chat_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chat> {
        self.rows.iter()
    }
}

impl ListModel for ChatsModel {
    type Role = ChatRole;

    const NAME: &'static str = "chats";

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn data_for(&self, row: isize, role: ChatRole) -> ModelValue<'_> {
        let Some(chat) = self.rows.get(row) else {
            return ModelValue::Empty;
        };
        match role {
            ChatRole::Id => ModelValue::Text(chat.id()),
            ChatRole::Type => ModelValue::Text(chat.chat_type().as_str()),
            ChatRole::Name => ModelValue::Text(chat.name()),
            ChatRole::IsOpen => ModelValue::Bool(chat.is_open()),
            ChatRole::LastReadId => ModelValue::Text(chat.last_read_id()),
            ChatRole::UnreadCount => ModelValue::Int(chat.unread_count()),
            ChatRole::MembersModel => ModelValue::Users(chat.live_members()),
            ChatRole::MessagesModel => ModelValue::Messages(chat.messages()),
        }
    }

    fn connect(&mut self, observer: Rc<dyn ModelObserver>) {
        self.rows.connect(observer);
    }
}

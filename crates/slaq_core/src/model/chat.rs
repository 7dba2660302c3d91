//! Channel, group and direct conversation entity.
//!
//! # Invariants
//! - `id` is the identity used for lookups and row correlation.
//! - Members are weak references keyed by user id; dead ones are pruned on
//!   access and never dereferenced.
//! - The chat owns its message list.

use crate::list::message_list_model::MessageListModel;
use crate::model::parse::{read_bool, read_i64, read_id, read_string, ParseReport, Parsed, Record};
use crate::model::user::{SharedUser, UserRef};
use crate::notify::Observers;
use log::{debug, warn, Level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Presence value carried by every chat; chats have no live status of their own.
pub const CHAT_PRESENCE_PLACEHOLDER: &str = "none";

/// Kind of conversation a chat represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    #[default]
    Channel,
    Group,
    Conversation,
}

impl ChatType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Group => "group",
            Self::Conversation => "conversation",
        }
    }

    /// Derives the type from Slack's `is_im` / `is_group` / `is_mpim` flags.
    pub fn from_record(record: &Record) -> ChatType {
        let flag = |field: &str| read_bool(record, field).unwrap_or(false);
        if flag("is_im") {
            Self::Conversation
        } else if flag("is_group") || flag("is_mpim") {
            Self::Group
        } else {
            Self::Channel
        }
    }
}

/// Receives membership changes of one chat.
pub trait MembersObserver {
    fn members_changed(&self, chat_id: &str);
}

#[derive(Debug, Default)]
pub struct Chat {
    id: String,
    chat_type: ChatType,
    name: String,
    presence: String,
    is_open: bool,
    last_read_id: String,
    unread_count: i64,
    members: BTreeMap<String, UserRef>,
    messages: MessageListModel,
    member_observers: Observers<dyn MembersObserver>,
}

impl Chat {
    /// Builds a chat from a channel record. Missing fields default silently;
    /// issues only reach the debug log.
    pub fn create(record: &Record) -> Chat {
        let Parsed { value, report } = Self::parse(record);
        report.log(Level::Debug);
        value
    }

    pub fn parse(record: &Record) -> Parsed<Chat> {
        let mut report = ParseReport::new("chat");
        let id = read_id(record).unwrap_or_else(|issue| {
            report.warn("id", issue);
            String::new()
        });
        report.identify("id", id.as_str());

        let mut text = |field: &'static str| {
            read_string(record, field).unwrap_or_else(|issue| {
                report.warn(field, issue);
                String::new()
            })
        };
        let name = text("name");
        let last_read_id = text("last_read");

        let is_open = read_bool(record, "is_member").unwrap_or_else(|issue| {
            report.warn("is_member", issue);
            false
        });
        let unread_count = read_i64(record, "unread_count_display").unwrap_or_else(|issue| {
            report.warn("unread_count_display", issue);
            0
        });

        Parsed {
            value: Chat {
                id,
                chat_type: ChatType::from_record(record),
                name,
                presence: CHAT_PRESENCE_PLACEHOLDER.to_string(),
                is_open,
                last_read_id,
                unread_count,
                ..Chat::default()
            },
            report,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chat_type(&self) -> ChatType {
        self.chat_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn presence(&self) -> &str {
        &self.presence
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn last_read_id(&self) -> &str {
        &self.last_read_id
    }

    pub fn unread_count(&self) -> i64 {
        self.unread_count
    }

    pub fn messages(&self) -> &MessageListModel {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageListModel {
        &mut self.messages
    }

    pub fn connect_members(&mut self, observer: Rc<dyn MembersObserver>) {
        self.member_observers.connect(observer);
    }

    /// Replaces the member set. Dead references and users without an id are
    /// skipped.
    pub fn set_members(&mut self, members: impl IntoIterator<Item = UserRef>) {
        self.members.clear();
        for member in members {
            let Some(user_id) = self.live_member_id(&member) else {
                continue;
            };
            self.members.insert(user_id, member);
        }
        self.emit_members_changed();
    }

    pub fn add_member(&mut self, member: UserRef) {
        let Some(user_id) = self.live_member_id(&member) else {
            return;
        };
        if self.members.contains_key(&user_id) {
            warn!(
                "event=chat_member_add module=model status=duplicate chat_id={} user_id={}",
                self.id, user_id
            );
        }
        self.members.insert(user_id, member);
        self.emit_members_changed();
    }

    pub fn remove_member(&mut self, user_id: &str) {
        if self.members.remove(user_id).is_none() {
            debug!(
                "event=chat_member_remove module=model status=absent chat_id={} user_id={}",
                self.id, user_id
            );
            return;
        }
        self.emit_members_changed();
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members
            .get(user_id)
            .is_some_and(|member| member.is_alive())
    }

    /// Live members ordered by user id; members that have gone away are
    /// dropped from the set.
    pub fn members(&mut self) -> Vec<SharedUser> {
        let chat_id = self.id.as_str();
        let mut live = Vec::with_capacity(self.members.len());
        self.members.retain(|user_id, member| match member.upgrade() {
            Some(user) => {
                live.push(user);
                true
            }
            None => {
                debug!(
                    "event=chat_member_prune module=model status=gone chat_id={} user_id={}",
                    chat_id, user_id
                );
                false
            }
        });
        live
    }

    /// Live members without pruning, for read-only callers.
    pub fn live_members(&self) -> Vec<SharedUser> {
        self.members.values().filter_map(UserRef::upgrade).collect()
    }

    fn live_member_id(&self, member: &UserRef) -> Option<String> {
        match member_id(member) {
            Ok(user_id) => Some(user_id),
            Err(reason) => {
                warn!(
                    "event=chat_member_add module=model status=skipped chat_id={} reason={}",
                    self.id, reason
                );
                None
            }
        }
    }

    fn emit_members_changed(&self) {
        let chat_id = self.id.as_str();
        self.member_observers
            .emit(|observer| observer.members_changed(chat_id));
    }
}

/// Why a member reference was not added to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberSkip {
    Gone,
    Borrowed,
    EmptyId,
}

impl Display for MemberSkip {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Gone => "null_user",
            Self::Borrowed => "borrowed",
            Self::EmptyId => "empty_id",
        };
        f.write_str(reason)
    }
}

fn member_id(member: &UserRef) -> Result<String, MemberSkip> {
    let user = member.upgrade().ok_or(MemberSkip::Gone)?;
    let user_id = user
        .try_borrow()
        .map_err(|_| MemberSkip::Borrowed)?
        .user_id()
        .to_string();
    if user_id.is_empty() {
        return Err(MemberSkip::EmptyId);
    }
    Ok(user_id)
}

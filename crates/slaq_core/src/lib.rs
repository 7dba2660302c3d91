//! Model and storage core for the Slaq desktop Slack client.
//! This crate owns the entities, the raw record cache and the list models
//! the UI layer observes.

pub mod list;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod storage;

pub use list::chats_model::{ChatRole, ChatsModel};
pub use list::message_list_model::{MessageListModel, MessageRole};
pub use list::observer::{ListModel, ModelObserver, ModelValue};
pub use list::role::{role_names, Role};
pub use list::users_model::{UserRole, UsersModel};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chat::{Chat, ChatType, MembersObserver, CHAT_PRESENCE_PLACEHOLDER};
pub use model::message::Message;
pub use model::parse::{FieldError, FieldIssue, ParseReport, Parsed, Record};
pub use model::user::{
    set_shared_presence, Presence, PresenceObserver, SharedUser, User, UserDirectory, UserRef,
};
pub use notify::Observers;
pub use service::session::Session;
pub use storage::Storage;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

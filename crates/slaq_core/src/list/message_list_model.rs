//! Per-chat list model of messages.

use crate::list::observer::{ListModel, ModelObserver, ModelValue};
use crate::list::role::Role;
use crate::list::rows::RowStore;
use crate::model::message::Message;
use log::debug;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    Text,
    User,
    Time,
    Attachments,
}

impl Role for MessageRole {
    const ALL: &'static [Self] = &[Self::Text, Self::User, Self::Time, Self::Attachments];

    fn id(self) -> i32 {
        self as i32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::User => "User",
            Self::Time => "Time",
            Self::Attachments => "Attachments",
        }
    }
}

#[derive(Debug)]
pub struct MessageListModel {
    rows: RowStore<Message>,
}

impl Default for MessageListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListModel {
    pub fn new() -> Self {
        Self {
            rows: RowStore::new("messages"),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_message(&mut self, message: Message) {
        self.rows.push(message);
    }

    pub fn message(&self, row: isize) -> Option<&Message> {
        self.rows.get(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.rows.iter()
    }
}

impl ListModel for MessageListModel {
    type Role = MessageRole;

    const NAME: &'static str = "messages";

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn data_for(&self, row: isize, role: MessageRole) -> ModelValue<'_> {
        let Some(message) = self.rows.get(row) else {
            return ModelValue::Empty;
        };
        match role {
            MessageRole::Text => ModelValue::Text(message.text()),
            MessageRole::User => match message.author() {
                Some(user) => ModelValue::User(user),
                None => {
                    debug!(
                        "event=model_read module=list status=user_gone model=messages row={}",
                        row
                    );
                    ModelValue::Empty
                }
            },
            MessageRole::Time => ModelValue::Text(message.time()),
            MessageRole::Attachments => ModelValue::TextList(message.attachments()),
        }
    }

    fn connect(&mut self, observer: Rc<dyn ModelObserver>) {
        self.rows.connect(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageListModel, MessageRole};
    use crate::list::observer::ListModel;
    use crate::model::message::Message;
    use crate::model::user::{User, UserRef};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn reads_every_role_of_the_last_message() {
        let author = Rc::new(RefCell::new(User::create(
            json!({"id": "U1", "name": "ann"})
                .as_object()
                .expect("object fixture"),
        )));
        let mut messages = MessageListModel::new();
        messages.add_message(Message::new("first", UserRef::to(&author), "1.0"));
        messages.add_message(
            Message::new("second", UserRef::to(&author), "2.0")
                .with_attachments(vec!["F1".to_string()]),
        );

        assert_eq!(messages.row_count(), 2);
        assert_eq!(messages.data(1, 0).as_text(), Some("second"));
        assert_eq!(messages.data(1, 2).as_text(), Some("2.0"));
        assert_eq!(
            messages.data(1, 3).as_text_list(),
            Some(["F1".to_string()].as_slice())
        );
        let user = messages.data_for(1, MessageRole::User);
        assert_eq!(
            user.as_user().map(|u| u.borrow().user_id().to_string()),
            Some("U1".to_string())
        );
    }

    #[test]
    fn dead_author_reads_as_empty() {
        let author = Rc::new(RefCell::new(User::default()));
        let mut messages = MessageListModel::new();
        messages.add_message(Message::new("orphan", UserRef::to(&author), "1.0"));
        drop(author);

        assert!(messages.data_for(0, MessageRole::User).is_empty());
        assert_eq!(messages.data_for(0, MessageRole::Text).as_text(), Some("orphan"));
    }

    #[test]
    fn role_names_match_role_ids() {
        let names = MessageListModel::new().role_names();
        assert_eq!(names.len(), 4);
        assert_eq!(names.get(&1), Some(&"User"));
        assert_eq!(names.get(&3), Some(&"Attachments"));
    }
}

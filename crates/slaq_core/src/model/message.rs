//! Chat message entity.

use crate::model::parse::{read_array, read_string, FieldIssue, ParseReport, Parsed, Record};
use crate::model::user::{SharedUser, UserDirectory, UserRef};
use log::Level;
use serde_json::Value;

const DEFAULT_MESSAGE_TYPE: &str = "message";

/// One message of a chat. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Message {
    text: String,
    user: UserRef,
    time: String,
    attachments: Vec<String>,
    message_type: String,
}

impl Message {
    pub fn new(text: impl Into<String>, user: UserRef, time: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user,
            time: time.into(),
            attachments: Vec::new(),
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = message_type.into();
        self
    }

    /// Builds a message from a Slack message record; issues are logged at
    /// debug level since every field has a usable default.
    pub fn create(record: &Record, users: &impl UserDirectory) -> Message {
        let Parsed { value, report } = Self::parse(record, users);
        report.log(Level::Debug);
        value
    }

    pub fn parse(record: &Record, users: &impl UserDirectory) -> Parsed<Message> {
        let mut report = ParseReport::new("message");

        let text = read_string(record, "text").unwrap_or_else(|issue| {
            report.warn("text", issue);
            String::new()
        });

        let user = match read_string(record, "user") {
            Ok(user_id) => users.user_ref(&user_id).unwrap_or_else(|| {
                report.warn("user", FieldIssue::Unrecognized(user_id));
                UserRef::dangling()
            }),
            Err(issue) => {
                report.warn("user", issue);
                UserRef::dangling()
            }
        };

        let time = read_string(record, "ts").unwrap_or_else(|issue| {
            report.warn("ts", issue);
            String::new()
        });
        report.identify("ts", time.as_str());

        let attachments = match read_array(record, "files") {
            Ok(files) => files.iter().filter_map(attachment_reference).collect(),
            Err(FieldIssue::Missing) => Vec::new(),
            Err(issue) => {
                report.warn("files", issue);
                Vec::new()
            }
        };

        let message_type = read_string(record, "type").unwrap_or_else(|issue| {
            report.warn("type", issue);
            DEFAULT_MESSAGE_TYPE.to_string()
        });

        Parsed {
            value: Message {
                text,
                user,
                time,
                attachments,
                message_type,
            },
            report,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn user(&self) -> &UserRef {
        &self.user
    }

    /// The author, if it is still alive.
    pub fn author(&self) -> Option<SharedUser> {
        self.user.upgrade()
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }
}

// Files are referenced by id; plain strings are taken as-is.
fn attachment_reference(file: &Value) -> Option<String> {
    match file {
        Value::String(reference) if !reference.is_empty() => Some(reference.clone()),
        Value::Object(object) => read_string(object, "id").ok().filter(|id| !id.is_empty()),
        _ => None,
    }
}

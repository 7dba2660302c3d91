//! Slack user entity and weak user handles.
//!
//! # Invariants
//! - `user_id` is non-empty for every usable user.
//! - Presence is the only attribute that changes after construction, and a
//!   change notification fires only on an actual transition.
//! - `UserRef` never keeps a `User` alive.

use crate::model::parse::{
    read_bool, read_id, read_non_empty_string, read_object, read_string, FieldIssue, ParseReport,
    Parsed, Record,
};
use crate::notify::Observers;
use log::Level;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use url::Url;

/// Live status of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Unknown,
    Active,
    Away,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Active => "active",
            Self::Away => "away",
        }
    }

    /// Parses a Slack presence string; only `active` and `away` are known.
    pub fn parse(value: &str) -> Result<Presence, FieldIssue> {
        match value {
            "active" => Ok(Self::Active),
            "away" => Ok(Self::Away),
            other => Err(FieldIssue::Unrecognized(other.to_string())),
        }
    }
}

/// Receives presence transitions of one user.
pub trait PresenceObserver {
    fn presence_changed(&self, user_id: &str, presence: Presence);
}

/// A Slack workspace member.
#[derive(Debug, Default)]
pub struct User {
    user_id: String,
    full_name: String,
    presence: Presence,
    avatar_url: Option<Url>,
    is_bot: bool,
    observers: Observers<dyn PresenceObserver>,
}

/// Primary, owning handle of a user (held by `UsersModel`).
pub type SharedUser = Rc<RefCell<User>>;

impl User {
    /// Builds a user from a record, logging every issue found.
    ///
    /// Never fails: a record without a usable `id` yields a user whose id is
    /// empty and whose other fields are defaults. Check [`User::is_valid`].
    pub fn create(record: &Record) -> User {
        let Parsed { value, report } = Self::parse(record);
        report.log(Level::Warn);
        value
    }

    /// Builds a user from a record and returns the parse report with it.
    pub fn parse(record: &Record) -> Parsed<User> {
        let mut report = ParseReport::new("user");

        let user_id = match read_id(record) {
            Ok(id) => id,
            Err(issue) => {
                report.fail("id", issue);
                return Parsed {
                    value: User::default(),
                    report,
                };
            }
        };
        report.identify("id", user_id.as_str());

        let full_name = match read_non_empty_string(record, "name") {
            Ok(name) => name,
            Err(issue) => {
                report.warn("name", issue);
                String::new()
            }
        };

        let presence = match read_string(record, "presence").and_then(|raw| Presence::parse(&raw))
        {
            Ok(presence) => presence,
            Err(issue) => {
                report.warn("presence", issue);
                Presence::Unknown
            }
        };

        let avatar_url = match read_object(record, "profile")
            .and_then(|profile| read_string(profile, "image_512"))
            .and_then(|raw| parse_avatar_url(&raw))
        {
            Ok(url) => Some(url),
            Err(issue) => {
                report.warn("profile.image_512", issue);
                None
            }
        };

        let is_bot = match read_bool(record, "is_bot") {
            Ok(flag) => flag,
            Err(FieldIssue::Missing) => false,
            Err(issue) => {
                report.warn("is_bot", issue);
                false
            }
        };

        Parsed {
            value: User {
                user_id,
                full_name,
                presence,
                avatar_url,
                is_bot,
                observers: Observers::new(),
            },
            report,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    /// `false` when construction failed for lack of an id.
    pub fn is_valid(&self) -> bool {
        !self.user_id.is_empty()
    }

    pub fn connect(&mut self, observer: Rc<dyn PresenceObserver>) {
        self.observers.connect(observer);
    }

    /// Sets presence and notifies observers; returns whether it changed.
    pub fn set_presence(&mut self, presence: Presence) -> bool {
        if !self.replace_presence(presence) {
            return false;
        }
        let user_id = self.user_id.as_str();
        self.observers
            .emit(|observer| observer.presence_changed(user_id, presence));
        true
    }

    fn replace_presence(&mut self, presence: Presence) -> bool {
        if self.presence == presence {
            return false;
        }
        self.presence = presence;
        true
    }
}

/// Sets the presence of a shared user, notifying after the borrow ends.
///
/// Observers may therefore read the user again from inside the callback.
pub fn set_shared_presence(user: &SharedUser, presence: Presence) -> bool {
    let (user_id, observers) = {
        let mut guard = user.borrow_mut();
        if !guard.replace_presence(presence) {
            return false;
        }
        (guard.user_id.clone(), guard.observers.snapshot())
    };
    for observer in observers {
        observer.presence_changed(&user_id, presence);
    }
    true
}

fn parse_avatar_url(raw: &str) -> Result<Url, FieldIssue> {
    if raw.is_empty() {
        return Err(FieldIssue::Empty);
    }
    Url::parse(raw).map_err(|_| FieldIssue::InvalidUrl(raw.to_string()))
}

/// Non-owning reference to a user owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct UserRef(Weak<RefCell<User>>);

impl UserRef {
    pub fn to(user: &SharedUser) -> Self {
        Self(Rc::downgrade(user))
    }

    /// A reference that never resolves.
    pub fn dangling() -> Self {
        Self(Weak::new())
    }

    pub fn upgrade(&self) -> Option<SharedUser> {
        self.0.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Lookup of users by id, used to resolve references while parsing.
pub trait UserDirectory {
    fn user_ref(&self, user_id: &str) -> Option<UserRef>;
}

//! List model of workspace users; the primary owner of every `User`.

use crate::list::observer::{ListModel, ModelObserver, ModelValue};
use crate::list::role::Role;
use crate::list::rows::RowStore;
use crate::model::user::{set_shared_presence, Presence, SharedUser, User, UserDirectory, UserRef};
use log::{debug, warn};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    UserObject,
}

impl Role for UserRole {
    const ALL: &'static [Self] = &[Self::UserObject];

    fn id(self) -> i32 {
        self as i32
    }

    fn name(self) -> &'static str {
        match self {
            Self::UserObject => "UserObject",
        }
    }
}

#[derive(Debug)]
pub struct UsersModel {
    rows: RowStore<SharedUser>,
    // user id -> latest row holding it
    index: HashMap<String, usize>,
}

impl Default for UsersModel {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersModel {
    pub fn new() -> Self {
        Self {
            rows: RowStore::new("users"),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends one user and returns its owning handle.
    ///
    /// The user is appended as given; validating its id is up to the caller.
    pub fn add_user(&mut self, user: User) -> SharedUser {
        let user_id = user.user_id().to_string();
        let shared = Rc::new(RefCell::new(user));
        let range = self.rows.push(shared.clone());
        self.index_row(user_id, range.start);
        shared
    }

    /// Parses a batch of user records and appends the valid ones as a
    /// single insertion.
    pub fn add_users(&mut self, records: &[Value]) -> Range<usize> {
        let mut batch = Vec::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());
        for (position, value) in records.iter().enumerate() {
            let Some(record) = value.as_object() else {
                warn!(
                    "event=users_add module=list status=skipped position={} reason=not_object",
                    position
                );
                continue;
            };
            let user = User::create(record);
            if !user.is_valid() {
                warn!(
                    "event=users_add module=list status=skipped position={} reason=missing_id",
                    position
                );
                continue;
            }
            ids.push(user.user_id().to_string());
            batch.push(Rc::new(RefCell::new(user)));
        }
        let range = self.rows.append(batch);
        for (row, user_id) in range.clone().zip(ids) {
            self.index_row(user_id, row);
        }
        range
    }

    // User ids never change after construction, so rows stay indexed.
    fn index_row(&mut self, user_id: String, row: usize) {
        if !user_id.is_empty() {
            self.index.insert(user_id, row);
        }
    }

    /// Latest row with `user_id`, if any.
    pub fn user(&self, user_id: &str) -> Option<SharedUser> {
        let row = *self.index.get(user_id)?;
        self.rows.at(row).cloned()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.index.contains_key(user_id)
    }

    /// Routes a presence update to the user; returns whether it changed.
    pub fn set_presence(&self, user_id: &str, presence: Presence) -> bool {
        match self.user(user_id) {
            Some(user) => set_shared_presence(&user, presence),
            None => {
                debug!(
                    "event=presence_update module=list status=unknown_user user_id={}",
                    user_id
                );
                false
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedUser> {
        self.rows.iter()
    }
}

impl UserDirectory for UsersModel {
    fn user_ref(&self, user_id: &str) -> Option<UserRef> {
        self.user(user_id).map(|user| UserRef::to(&user))
    }
}

impl ListModel for UsersModel {
    type Role = UserRole;

    const NAME: &'static str = "users";

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn data_for(&self, row: isize, role: UserRole) -> ModelValue<'_> {
        let Some(user) = self.rows.get(row) else {
            return ModelValue::Empty;
        };
        match role {
            UserRole::UserObject => ModelValue::User(user.clone()),
        }
    }

    fn connect(&mut self, observer: Rc<dyn ModelObserver>) {
        self.rows.connect(observer);
    }
}

//! UI-facing observation protocol of the list models.

use crate::list::message_list_model::MessageListModel;
use crate::list::role::{role_names, Role};
use crate::model::user::SharedUser;
use log::warn;
use std::collections::BTreeMap;
use std::ops::Range;
use std::rc::Rc;

/// Receives row insertion notifications of one model.
///
/// Both callbacks get the same half-open range `[first, first + added)`.
pub trait ModelObserver {
    fn rows_about_to_be_inserted(&self, range: Range<usize>);

    fn rows_inserted(&self, range: Range<usize>);
}

/// Value of one field of one row.
#[derive(Debug, Clone, Default)]
pub enum ModelValue<'a> {
    /// Bad row, unknown role, or a referenced entity that is gone.
    #[default]
    Empty,
    Text(&'a str),
    Int(i64),
    Bool(bool),
    TextList(&'a [String]),
    User(SharedUser),
    Users(Vec<SharedUser>),
    Messages(&'a MessageListModel),
}

impl<'a> ModelValue<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&'a [String]> {
        match self {
            Self::TextList(values) => Some(*values),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&SharedUser> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_users(&self) -> Option<&[SharedUser]> {
        match self {
            Self::Users(users) => Some(users.as_slice()),
            _ => None,
        }
    }

    pub fn as_messages(&self) -> Option<&'a MessageListModel> {
        match self {
            Self::Messages(model) => Some(*model),
            _ => None,
        }
    }
}

/// Contract between a list model and the UI layer.
pub trait ListModel {
    type Role: Role;

    /// Model name used in diagnostics.
    const NAME: &'static str;

    fn row_count(&self) -> usize;

    /// Reads one typed field. Out-of-range rows read as `Empty`.
    fn data_for(&self, row: isize, role: Self::Role) -> ModelValue<'_>;

    fn connect(&mut self, observer: Rc<dyn ModelObserver>);

    /// Reads one field by raw role id, as the UI does.
    fn data(&self, row: isize, role_id: i32) -> ModelValue<'_> {
        if row_index(row, self.row_count()).is_none() {
            warn!(
                "event=model_read module=list status=invalid_row model={} row={} row_count={}",
                Self::NAME,
                row,
                self.row_count()
            );
            return ModelValue::Empty;
        }
        match Self::Role::from_id(role_id) {
            Some(role) => self.data_for(row, role),
            None => {
                warn!(
                    "event=model_read module=list status=invalid_role model={} role={}",
                    Self::NAME,
                    role_id
                );
                ModelValue::Empty
            }
        }
    }

    fn role_names(&self) -> BTreeMap<i32, &'static str> {
        role_names::<Self::Role>()
    }
}

/// Converts a UI row into an index, or `None` when out of range.
pub(crate) fn row_index(row: isize, row_count: usize) -> Option<usize> {
    usize::try_from(row).ok().filter(|index| *index < row_count)
}

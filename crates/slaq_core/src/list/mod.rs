//! Append-only list models observed by the UI.
//!
//! # Responsibility
//! - Expose rows and named fields ("roles") of users, chats and messages.
//! - Announce every append to connected observers before and after it
//!   happens.
//!
//! # Invariants
//! - Insertion ranges are half-open and cover exactly the appended rows.
//! - Read accessors never panic; bad rows and unknown roles read as
//!   `ModelValue::Empty` and are logged.
//! - Rows are never removed or reordered.

pub mod chats_model;
pub mod message_list_model;
pub mod observer;
pub mod role;
pub mod rows;
pub mod users_model;

//! Domain entities built from Slack API records.
//!
//! # Responsibility
//! - Turn JSON-shaped records into `User`, `Chat` and `Message` values.
//! - Report per-field problems without aborting construction.
//!
//! # Invariants
//! - A `User` with an empty id is the "construction failed" value; nothing
//!   else about it is populated.
//! - Entities never own the `User`s they refer to.

pub mod chat;
pub mod message;
pub mod parse;
pub mod user;

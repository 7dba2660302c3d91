//! Use-case wiring between the record cache and the list models.
//!
//! # Responsibility
//! - Own one `Storage` and the models fed from it.
//! - Keep the network collaborator decoupled from model internals.

pub mod session;

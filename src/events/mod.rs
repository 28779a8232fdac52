//! Event handling module.
//!
//! This module contains the inbound events produced by external
//! collaborators (auth service, chat transport, account refresh, navigation)
//! and the handler that turns each one into the next composed snapshot.

pub mod inbound;

pub use inbound::{Event, Handler};

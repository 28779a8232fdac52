//! State management module.
//!
//! This module holds the user session and chat state machines, the page
//! navigation flags, and the composed snapshot built from them.

pub mod chat;
pub mod error;
pub mod navigation;
pub mod user;

mod snapshot;

pub use chat::{
    BusyInfo, ChatMessage, ChatState, ChatStatus, ChatWindowState, Conversation, QueueTicket,
};
pub use error::StateError;
pub use navigation::{ActivePage, PageState, PageStatus};
pub use snapshot::NetBankState;
pub use user::{ErrorDetails, ErrorType, RetryHint, SessionError, UserInformation, UserState};

//! Client-side state for a retail banking client.
//!
//! - [`ledger`]: currencies and accounts, with the DKK scoping rules
//! - [`state`]: user session and chat state machines, page flags, and the
//!   composed [`state::NetBankState`] snapshot
//! - [`events`]: inbound events and the handler deriving the next snapshot
//! - [`overlay`]: dismissal controller for popovers
//! - [`app`]: single writer over the current snapshot

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod logger;
pub mod overlay;
pub mod state;

pub use app::App;
pub use error::{AppError, AppResult};

//! User session state machine.
//!
//! `LoggedOut -> Loading -> {LoggedIn, Error}`. From `Error` or `LoggedIn` a
//! new `Loading` (retry, refresh) or `LoggedOut` may follow. A direct
//! `LoggedOut -> LoggedIn` is accepted for restoring a cached session.

use super::StateError;
use chrono::{DateTime, Utc};
use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};

const MACHINE: &str = "user session";

/// Basic details for the logged-in user.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInformation {
    pub email: String,
    pub name: String,
}

/// Which side of the exchange caused a session error.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Client,
    Server,
}

/// Retry affordance the UI should offer for an error.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RetryHint {
    /// Show corrective guidance; retrying unchanged input will fail again.
    Correct,
    /// Offer a generic retry.
    Retry,
}

impl ErrorType {
    pub fn retry_hint(&self) -> RetryHint {
        match self {
            ErrorType::Client => RetryHint::Correct,
            ErrorType::Server => RetryHint::Retry,
        }
    }
}

/// Error details carried by `UserState::Error`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{error_type:?} error {code}: {message}")]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub error_type: ErrorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Session errors surfaced to the UI.
pub type SessionError = ErrorDetails;

impl ErrorDetails {
    pub fn new(code: impl Into<String>, message: impl Into<String>, error_type: ErrorType) -> Self {
        ErrorDetails {
            code: code.into(),
            message: message.into(),
            error_type,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Authentication lifecycle of the current user.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UserState {
    #[default]
    LoggedOut,
    Loading,
    Error {
        error: ErrorDetails,
    },
    LoggedIn {
        user: UserInformation,
    },
}

impl UserState {
    /// Return a short name for the current variant.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            UserState::LoggedOut => "logged out",
            UserState::Loading => "loading",
            UserState::Error { .. } => "in error",
            UserState::LoggedIn { .. } => "logged in",
        }
    }

    pub fn user(&self) -> Option<&UserInformation> {
        match self {
            UserState::LoggedIn { user } => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetails> {
        match self {
            UserState::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, UserState::LoggedIn { .. })
    }

    /// Start a fetch. Rejected while one is already in flight.
    ///
    pub fn begin_loading(&self) -> Result<Self, StateError> {
        match self {
            UserState::Loading => Err(self.invalid("start loading")),
            _ => Ok(UserState::Loading),
        }
    }

    /// Complete a fetch with the authenticated user. Also accepted straight
    /// from `LoggedOut`, which is how a cached session is restored.
    ///
    pub fn log_in(&self, user: UserInformation) -> Result<Self, StateError> {
        match self {
            UserState::Loading => Ok(UserState::LoggedIn { user }),
            UserState::LoggedOut => {
                debug!("Restoring session for '{}' without a fetch.", user.email);
                Ok(UserState::LoggedIn { user })
            }
            _ => Err(self.invalid("log in")),
        }
    }

    /// Complete a fetch with an error.
    ///
    pub fn fail(&self, error: ErrorDetails) -> Result<Self, StateError> {
        match self {
            UserState::Loading => Ok(UserState::Error { error }),
            _ => Err(self.invalid("record an error")),
        }
    }

    /// Explicit logout. Accepted from every variant.
    ///
    pub fn log_out(&self) -> Self {
        UserState::LoggedOut
    }

    fn invalid(&self, action: &'static str) -> StateError {
        StateError::InvalidTransition {
            machine: MACHINE,
            from: self.name(),
            action,
        }
    }
}

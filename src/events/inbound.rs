use crate::error::AppResult;
use crate::ledger::{AccountRecord, Ledger};
use crate::state::{
    ActivePage, BusyInfo, ChatMessage, ChatWindowState, ErrorDetails, NetBankState,
    UserInformation,
};
use chrono::{DateTime, Utc};
use log::*;
use serde::Deserialize;

/// Specify different inbound event types. Field names are camelCase, like
/// the nested payloads they carry.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    LoginStarted,
    LoginSucceeded {
        user: UserInformation,
    },
    LoginFailed {
        error: ErrorDetails,
    },
    LoggedOut,
    ChatConnectRequested,
    ChatQueueUpdated {
        position: u32,
        #[serde(default, rename = "busyInfo")]
        busy_info: Option<BusyInfo>,
    },
    ChatAgentJoined,
    ChatMessageReceived {
        message: ChatMessage,
    },
    ChatDraftChanged {
        text: String,
    },
    ChatDraftSent {
        #[serde(default, rename = "timeSent")]
        time_sent: Option<DateTime<Utc>>,
    },
    ChatDisconnected,
    ChatWindowChanged {
        #[serde(rename = "windowState")]
        window_state: ChatWindowState,
    },
    AccountsRefreshStarted,
    AccountsRefreshed {
        accounts: Vec<AccountRecord>,
    },
    AccountsRefreshFailed,
    Navigate {
        page: ActivePage,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::LoginStarted => "login_started",
            Event::LoginSucceeded { .. } => "login_succeeded",
            Event::LoginFailed { .. } => "login_failed",
            Event::LoggedOut => "logged_out",
            Event::ChatConnectRequested => "chat_connect_requested",
            Event::ChatQueueUpdated { .. } => "chat_queue_updated",
            Event::ChatAgentJoined => "chat_agent_joined",
            Event::ChatMessageReceived { .. } => "chat_message_received",
            Event::ChatDraftChanged { .. } => "chat_draft_changed",
            Event::ChatDraftSent { .. } => "chat_draft_sent",
            Event::ChatDisconnected => "chat_disconnected",
            Event::ChatWindowChanged { .. } => "chat_window_changed",
            Event::AccountsRefreshStarted => "accounts_refresh_started",
            Event::AccountsRefreshed { .. } => "accounts_refreshed",
            Event::AccountsRefreshFailed => "accounts_refresh_failed",
            Event::Navigate { .. } => "navigate",
        }
    }
}

/// Specify struct for deriving snapshots from inbound events.
///
pub struct Handler {
    guest_name: String,
}

impl Handler {
    pub fn new(guest_name: impl Into<String>) -> Self {
        Handler {
            guest_name: guest_name.into(),
        }
    }

    /// Return the snapshot that follows `state` after the given event. On
    /// error `state` is still the current snapshot.
    ///
    pub fn handle(&self, state: &NetBankState, event: Event) -> AppResult<NetBankState> {
        debug!("Processing inbound event '{}'...", event.name());
        let user = &state.user_state;
        let chat = &state.chat;
        let next = match event {
            Event::LoginStarted => state.with_user_state(user.begin_loading()?),
            Event::LoginSucceeded { user: info } => {
                info!("Logged in as '{}'.", info.email);
                state.with_user_state(user.log_in(info)?)
            }
            Event::LoginFailed { error } => {
                warn!("Login failed: {}", error);
                state.with_user_state(user.fail(error)?)
            }
            Event::LoggedOut => state.with_user_state(user.log_out()),
            Event::ChatConnectRequested => {
                state.with_chat(chat.with_status(chat.status.connect()?))
            }
            Event::ChatQueueUpdated {
                position,
                busy_info,
            } => state.with_chat(chat.with_status(chat.status.enqueue(position, busy_info)?)),
            Event::ChatAgentJoined => {
                info!("Support agent joined the chat.");
                state.with_chat(chat.with_status(chat.status.agent_joined()?))
            }
            Event::ChatMessageReceived { message } => {
                state.with_chat(chat.with_status(chat.status.receive(message)?))
            }
            Event::ChatDraftChanged { text } => {
                state.with_chat(chat.with_status(chat.status.edit_draft(text)?))
            }
            Event::ChatDraftSent { time_sent } => {
                let sender = state.sender_name(&self.guest_name);
                let time_sent = time_sent.unwrap_or_else(Utc::now);
                state.with_chat(chat.with_status(chat.status.send_draft(sender, time_sent)?))
            }
            Event::ChatDisconnected => {
                info!("Chat disconnected.");
                state.with_chat(chat.with_status(chat.status.disconnect()?))
            }
            Event::ChatWindowChanged { window_state } => {
                state.with_chat(chat.with_window(window_state))
            }
            Event::AccountsRefreshStarted => {
                state.with_page_state(state.page_state.start_loading())
            }
            Event::AccountsRefreshed { accounts } => {
                let incoming = Ledger::from_records(accounts)?;
                let ledger = state.accounts.refresh(incoming)?;
                let page = state.page_state.finish_loading().set_error(false);
                state.with_accounts(ledger, page)
            }
            Event::AccountsRefreshFailed => {
                let page = state.page_state.finish_loading().set_error(true);
                state.with_page_state(page)
            }
            Event::Navigate { page } => state.with_page_state(state.page_state.navigate(page)),
        };
        trace!(
            "User {}, chat {}, page {:?}.",
            next.user_state.name(),
            next.chat.status.name(),
            next.page_state.status()
        );
        Ok(next)
    }
}

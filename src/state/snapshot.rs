use super::{ActivePage, ChatState, ChatWindowState, PageState, UserState};
use crate::ledger::Ledger;
use serde::Serialize;

/// Composed application state read by the rendering layer.
///
/// Each transition builds a new snapshot; nothing inside one is mutated
/// after it has been handed out.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetBankState {
    pub user_state: UserState,
    pub page_state: PageState,
    pub accounts: Ledger,
    pub chat: ChatState,
}

impl NetBankState {
    pub fn new(start_page: ActivePage, chat_window: ChatWindowState) -> Self {
        NetBankState {
            page_state: PageState::new(start_page),
            chat: ChatState::new(chat_window),
            ..NetBankState::default()
        }
    }

    pub fn with_user_state(&self, user_state: UserState) -> Self {
        NetBankState {
            user_state,
            page_state: self.page_state,
            accounts: self.accounts.clone(),
            chat: self.chat.clone(),
        }
    }

    pub fn with_page_state(&self, page_state: PageState) -> Self {
        NetBankState {
            user_state: self.user_state.clone(),
            page_state,
            accounts: self.accounts.clone(),
            chat: self.chat.clone(),
        }
    }

    /// Replace the ledger and page flags together so a refresh lands in one
    /// snapshot.
    ///
    pub fn with_accounts(&self, accounts: Ledger, page_state: PageState) -> Self {
        NetBankState {
            user_state: self.user_state.clone(),
            page_state,
            accounts,
            chat: self.chat.clone(),
        }
    }

    pub fn with_chat(&self, chat: ChatState) -> Self {
        NetBankState {
            user_state: self.user_state.clone(),
            page_state: self.page_state,
            accounts: self.accounts.clone(),
            chat,
        }
    }

    /// Name used for outgoing chat messages.
    ///
    pub fn sender_name<'a>(&'a self, guest_name: &'a str) -> &'a str {
        match self.user_state.user() {
            Some(user) => &user.name,
            None => guest_name,
        }
    }
}

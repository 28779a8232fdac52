//! Navigation-related state types.

use serde::{Deserialize, Serialize};

/// Specifying the top-level pages.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePage {
    #[default]
    Accounts,
    Support,
}

/// Rendering status derived from the page flags.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PageStatus {
    Ready,
    Loading,
    Failed,
    /// An error is shown while a refresh is still in flight.
    FailedWhileRefreshing,
}

/// Active page plus independent loading and error flags.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub active_page: ActivePage,
    pub is_loading: bool,
    pub is_error: bool,
}

impl PageState {
    pub fn new(active_page: ActivePage) -> Self {
        PageState {
            active_page,
            is_loading: false,
            is_error: false,
        }
    }

    /// Move to the given page. Flags reset when the page actually changes.
    ///
    pub fn navigate(&self, page: ActivePage) -> Self {
        if page == self.active_page {
            *self
        } else {
            PageState::new(page)
        }
    }

    /// Mark a refresh in flight. An earlier error stays visible.
    ///
    pub fn start_loading(&self) -> Self {
        PageState {
            is_loading: true,
            ..*self
        }
    }

    pub fn finish_loading(&self) -> Self {
        PageState {
            is_loading: false,
            ..*self
        }
    }

    pub fn set_error(&self, is_error: bool) -> Self {
        PageState { is_error, ..*self }
    }

    pub fn status(&self) -> PageStatus {
        match (self.is_loading, self.is_error) {
            (false, false) => PageStatus::Ready,
            (true, false) => PageStatus::Loading,
            (false, true) => PageStatus::Failed,
            (true, true) => PageStatus::FailedWhileRefreshing,
        }
    }
}

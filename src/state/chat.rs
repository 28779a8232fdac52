//! Support-chat session state machine and chat window state.
//!
//! `Idle -> Connecting -> InQueue* -> Connected -> Disconnected`, where
//! `Disconnected` is left only through a fresh `Connecting`. The queue
//! position never grows within one queue span and the message log is
//! append-only.

use super::StateError;
use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

const MACHINE: &str = "chat";

/// Advisory about when support is busiest and quietest.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInfo {
    pub most_busy_times: Vec<String>,
    pub least_busy_times: Vec<String>,
}

/// A caller's place in the support queue.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTicket {
    position: NonZeroU32,
    #[serde(skip_serializing_if = "Option::is_none")]
    busy_info: Option<BusyInfo>,
}

impl QueueTicket {
    /// Position in the queue, 1 being next in line.
    ///
    pub fn position(&self) -> u32 {
        self.position.get()
    }

    pub fn busy_info(&self) -> Option<&BusyInfo> {
        self.busy_info.as_ref()
    }
}

/// A single chat message.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub name: String,
    pub message: String,
    pub time_sent: DateTime<Utc>,
}

/// Message log and unsent draft of a connected chat.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    current_message: String,
}

impl Conversation {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The text box contents, not yet sent.
    ///
    pub fn current_message(&self) -> &str {
        &self.current_message
    }

    fn append(&self, message: ChatMessage) -> Self {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend_from_slice(&self.messages);
        messages.push(message);
        Conversation {
            messages,
            current_message: self.current_message.clone(),
        }
    }
}

/// Status of the support chat.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChatStatus {
    #[default]
    Idle,
    Connecting,
    InQueue(QueueTicket),
    Connected(Conversation),
    Disconnected,
}

impl ChatStatus {
    /// Return a short name for the current variant.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            ChatStatus::Idle => "idle",
            ChatStatus::Connecting => "connecting",
            ChatStatus::InQueue(_) => "in queue",
            ChatStatus::Connected(_) => "connected",
            ChatStatus::Disconnected => "disconnected",
        }
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        match self {
            ChatStatus::Connected(conversation) => Some(conversation),
            _ => None,
        }
    }

    pub fn queue_ticket(&self) -> Option<&QueueTicket> {
        match self {
            ChatStatus::InQueue(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Start connecting to an agent.
    ///
    pub fn connect(&self) -> Result<Self, StateError> {
        match self {
            ChatStatus::Idle | ChatStatus::Disconnected => Ok(ChatStatus::Connecting),
            _ => Err(self.invalid("connect")),
        }
    }

    /// Enter the queue or move up in it. An update without busy info keeps
    /// the advisory already held.
    ///
    pub fn enqueue(&self, position: u32, busy_info: Option<BusyInfo>) -> Result<Self, StateError> {
        let position = NonZeroU32::new(position).ok_or(StateError::InvalidQueuePosition)?;
        match self {
            ChatStatus::Connecting => Ok(ChatStatus::InQueue(QueueTicket {
                position,
                busy_info,
            })),
            ChatStatus::InQueue(ticket) => {
                if position > ticket.position {
                    return Err(StateError::QueuePositionIncreased {
                        from: ticket.position.get(),
                        to: position.get(),
                    });
                }
                trace!("Queue position {} -> {}.", ticket.position, position);
                Ok(ChatStatus::InQueue(QueueTicket {
                    position,
                    busy_info: busy_info.or_else(|| ticket.busy_info.clone()),
                }))
            }
            _ => Err(self.invalid("join the queue")),
        }
    }

    /// An agent picked up the chat.
    ///
    pub fn agent_joined(&self) -> Result<Self, StateError> {
        match self {
            ChatStatus::Connecting | ChatStatus::InQueue(_) => {
                Ok(ChatStatus::Connected(Conversation::default()))
            }
            _ => Err(self.invalid("connect to an agent")),
        }
    }

    /// Append an incoming message to the log. The draft is left as is.
    ///
    pub fn receive(&self, message: ChatMessage) -> Result<Self, StateError> {
        match self {
            ChatStatus::Connected(conversation) => {
                Ok(ChatStatus::Connected(conversation.append(message)))
            }
            _ => Err(self.invalid("receive a message")),
        }
    }

    /// Replace the draft.
    ///
    pub fn edit_draft(&self, text: impl Into<String>) -> Result<Self, StateError> {
        match self {
            ChatStatus::Connected(conversation) => Ok(ChatStatus::Connected(Conversation {
                messages: conversation.messages.clone(),
                current_message: text.into(),
            })),
            _ => Err(self.invalid("edit a message")),
        }
    }

    /// Move the draft into the log under the sender's name and clear it, in
    /// one step.
    ///
    pub fn send_draft(
        &self,
        name: impl Into<String>,
        time_sent: DateTime<Utc>,
    ) -> Result<Self, StateError> {
        match self {
            ChatStatus::Connected(conversation) => {
                if conversation.current_message.trim().is_empty() {
                    return Err(StateError::EmptyDraft);
                }
                let sent = conversation.append(ChatMessage {
                    name: name.into(),
                    message: conversation.current_message.clone(),
                    time_sent,
                });
                Ok(ChatStatus::Connected(Conversation {
                    messages: sent.messages,
                    current_message: String::new(),
                }))
            }
            _ => Err(self.invalid("send a message")),
        }
    }

    /// The transport closed the chat. Repeating it is a no-op.
    ///
    pub fn disconnect(&self) -> Result<Self, StateError> {
        match self {
            ChatStatus::Idle => Err(self.invalid("disconnect")),
            _ => Ok(ChatStatus::Disconnected),
        }
    }

    fn invalid(&self, action: &'static str) -> StateError {
        StateError::InvalidTransition {
            machine: MACHINE,
            from: self.name(),
            action,
        }
    }
}

/// Visual state of the chat window, independent of the chat status.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatWindowState {
    #[default]
    Minimized,
    Open,
    FullScreen,
}

/// Chat window plus chat status.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatState {
    pub window_state: ChatWindowState,
    pub status: ChatStatus,
}

impl ChatState {
    pub fn new(window_state: ChatWindowState) -> Self {
        ChatState {
            window_state,
            status: ChatStatus::Idle,
        }
    }

    pub fn with_status(&self, status: ChatStatus) -> Self {
        ChatState {
            window_state: self.window_state,
            status,
        }
    }

    pub fn with_window(&self, window_state: ChatWindowState) -> Self {
        ChatState {
            window_state,
            status: self.status.clone(),
        }
    }

    pub fn minimize(&self) -> Self {
        self.with_window(ChatWindowState::Minimized)
    }

    pub fn open(&self) -> Self {
        self.with_window(ChatWindowState::Open)
    }

    pub fn full_screen(&self) -> Self {
        self.with_window(ChatWindowState::FullScreen)
    }

    /// Switch between full screen and the regular open window.
    ///
    pub fn toggle_full_screen(&self) -> Self {
        match self.window_state {
            ChatWindowState::FullScreen => self.open(),
            ChatWindowState::Minimized | ChatWindowState::Open => self.full_screen(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sent_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    fn connected() -> ChatStatus {
        ChatStatus::Idle
            .connect()
            .unwrap()
            .agent_joined()
            .unwrap()
    }

    #[test]
    fn queue_positions_count_down_to_connected() {
        let mut status = ChatStatus::Idle.connect().unwrap();
        let mut observed = vec![];
        for position in [5, 3, 1] {
            status = status.enqueue(position, None).unwrap();
            observed.push(status.queue_ticket().unwrap().position());
        }
        status = status.agent_joined().unwrap();
        assert_eq!(observed, vec![5, 3, 1]);
        assert!(matches!(status, ChatStatus::Connected(_)));
    }

    #[test]
    fn queue_position_may_repeat() {
        let status = ChatStatus::Connecting.enqueue(2, None).unwrap();
        let status = status.enqueue(2, None).unwrap();
        assert_eq!(status.queue_ticket().unwrap().position(), 2);
    }

    #[test]
    fn queue_position_may_not_increase() {
        let status = ChatStatus::Connecting.enqueue(3, None).unwrap();
        assert_eq!(
            status.enqueue(4, None),
            Err(StateError::QueuePositionIncreased { from: 3, to: 4 })
        );
    }

    #[test]
    fn queue_position_may_increase_after_disconnect() {
        let status = ChatStatus::Connecting
            .enqueue(2, None)
            .unwrap()
            .disconnect()
            .unwrap()
            .connect()
            .unwrap()
            .enqueue(9, None)
            .unwrap();
        assert_eq!(status.queue_ticket().unwrap().position(), 9);
    }

    #[test]
    fn queue_position_zero_is_rejected() {
        assert_eq!(
            ChatStatus::Connecting.enqueue(0, None),
            Err(StateError::InvalidQueuePosition)
        );
    }

    #[test]
    fn busy_info_is_kept_across_updates() {
        let busy_info = BusyInfo {
            most_busy_times: vec!["Mon 09:00-11:00".to_string()],
            least_busy_times: vec!["Thu 14:00-16:00".to_string()],
        };
        let status = ChatStatus::Connecting
            .enqueue(4, Some(busy_info.clone()))
            .unwrap()
            .enqueue(2, None)
            .unwrap();
        assert_eq!(status.queue_ticket().unwrap().busy_info(), Some(&busy_info));
    }

    #[test]
    fn sending_draft_moves_it_into_log() {
        let status = connected().edit_draft("Hello").unwrap();
        let status = status.send_draft("Jane", sent_at()).unwrap();
        let conversation = status.conversation().unwrap();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].message, "Hello");
        assert_eq!(conversation.messages()[0].name, "Jane");
        assert_eq!(conversation.messages()[0].time_sent, sent_at());
        assert_eq!(conversation.current_message(), "");
    }

    #[test]
    fn sending_empty_draft_is_rejected() {
        let status = connected().edit_draft("   ").unwrap();
        assert_eq!(
            status.send_draft("Jane", sent_at()),
            Err(StateError::EmptyDraft)
        );
    }

    #[test]
    fn receiving_keeps_draft() {
        let status = connected().edit_draft("Half typed").unwrap();
        let status = status
            .receive(ChatMessage {
                name: "Agent".to_string(),
                message: "How can I help?".to_string(),
                time_sent: sent_at(),
            })
            .unwrap();
        let conversation = status.conversation().unwrap();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.current_message(), "Half typed");
    }

    #[test]
    fn log_is_append_only() {
        let first = ChatMessage {
            name: "Agent".to_string(),
            message: "Hi".to_string(),
            time_sent: sent_at(),
        };
        let before = connected().receive(first.clone()).unwrap();
        let after = before
            .edit_draft("Thanks")
            .unwrap()
            .send_draft("Jane", sent_at())
            .unwrap();
        let messages = after.conversation().unwrap().messages();
        assert_eq!(messages[0], first);
        assert_eq!(messages[1].message, "Thanks");
        assert_eq!(before.conversation().unwrap().messages().len(), 1);
    }

    #[test]
    fn messages_require_connection() {
        assert!(ChatStatus::Idle.edit_draft("x").is_err());
        assert!(ChatStatus::Connecting.send_draft("Jane", sent_at()).is_err());
        assert!(ChatStatus::Disconnected
            .receive(ChatMessage {
                name: "Agent".to_string(),
                message: "late".to_string(),
                time_sent: sent_at(),
            })
            .is_err());
    }

    #[test]
    fn disconnected_is_reentered_through_connecting() {
        let status = connected().disconnect().unwrap();
        assert_eq!(status, ChatStatus::Disconnected);
        assert!(status.agent_joined().is_err());
        assert!(status.enqueue(1, None).is_err());
        assert!(status
            .receive(ChatMessage {
                name: "Agent".to_string(),
                message: "late".to_string(),
                time_sent: sent_at(),
            })
            .is_err());
        assert!(status.edit_draft("late").is_err());
        assert!(status.send_draft("Jane", sent_at()).is_err());
        // Repeating the disconnect stays put.
        assert_eq!(status.disconnect().unwrap(), ChatStatus::Disconnected);
        assert_eq!(status.connect().unwrap(), ChatStatus::Connecting);
    }

    #[test]
    fn idle_cannot_disconnect() {
        assert!(ChatStatus::Idle.disconnect().is_err());
        assert!(ChatStatus::Connecting.connect().is_err());
    }

    #[test]
    fn window_is_independent_of_status() {
        let chat = ChatState::new(ChatWindowState::Open).with_status(connected());
        let minimized = chat.minimize();
        assert_eq!(minimized.window_state, ChatWindowState::Minimized);
        assert_eq!(minimized.status, chat.status);
    }

    #[test]
    fn toggle_full_screen() {
        let chat = ChatState::default();
        assert_eq!(chat.toggle_full_screen().window_state, ChatWindowState::FullScreen);
        assert_eq!(
            chat.full_screen().toggle_full_screen().window_state,
            ChatWindowState::Open
        );
    }

    #[test]
    fn serializes_with_status_tag() {
        let status = ChatStatus::Connecting.enqueue(3, None).unwrap();
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "inQueue");
        assert_eq!(value["position"], 3);

        let value = serde_json::to_value(connected().edit_draft("Hi").unwrap()).unwrap();
        assert_eq!(value["status"], "connected");
        assert_eq!(value["currentMessage"], "Hi");

        let value = serde_json::to_value(ChatWindowState::FullScreen).unwrap();
        assert_eq!(value, "full-screen");
    }
}

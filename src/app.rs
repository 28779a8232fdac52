use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::{Event, Handler};
use crate::state::NetBankState;
use log::*;
use std::sync::Arc;

/// Outcome of replaying a sequence of events.
///
#[derive(Debug, Default)]
pub struct Replay {
    pub applied: usize,
    /// Index into the replayed sequence and the reason it was rejected.
    pub rejected: Vec<(usize, AppError)>,
}

/// Owns the current composed snapshot and is its only writer.
///
/// Readers hold `Arc` clones of past snapshots; a transition swaps in a new
/// one and never touches what readers already hold.
pub struct App {
    state: Arc<NetBankState>,
    handler: Handler,
}

impl App {
    /// Start a new application according to the given configuration.
    ///
    pub fn new(config: &Config) -> Self {
        info!(
            "Starting on page {:?} with chat window {:?}...",
            config.start_page, config.chat_window
        );
        App {
            state: Arc::new(NetBankState::new(config.start_page, config.chat_window)),
            handler: Handler::new(config.guest_name.clone()),
        }
    }

    /// Return the current snapshot.
    ///
    pub fn snapshot(&self) -> Arc<NetBankState> {
        Arc::clone(&self.state)
    }

    /// Apply one event. A rejected event leaves the snapshot unchanged.
    ///
    pub fn dispatch(&mut self, event: Event) -> AppResult<Arc<NetBankState>> {
        let name = event.name();
        match self.handler.handle(&self.state, event) {
            Ok(next) => {
                self.state = Arc::new(next);
                Ok(self.snapshot())
            }
            Err(err) => {
                warn!("Rejected event '{}': {}", name, err);
                Err(err)
            }
        }
    }

    /// Apply events in order, carrying on past rejected ones.
    ///
    pub fn replay(&mut self, events: impl IntoIterator<Item = Event>) -> Replay {
        let mut replay = Replay::default();
        for (index, event) in events.into_iter().enumerate() {
            match self.dispatch(event) {
                Ok(_) => replay.applied += 1,
                Err(err) => replay.rejected.push((index, err)),
            }
        }
        info!(
            "Replayed {} events, {} rejected.",
            replay.applied,
            replay.rejected.len()
        );
        replay
    }
}

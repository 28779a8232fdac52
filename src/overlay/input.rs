use super::{contains, DismissReason, FocusTarget, Overlay, OverlayContent};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

/// Specify what became of an input event offered to the overlay.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputOutcome {
    /// Not for the overlay: deliver to the popover content, or to the page
    /// when no session is open.
    PassThrough,
    /// Swallowed by the overlay.
    Consumed,
    /// Swallowed and the session was closed.
    Dismissed,
}

impl<C: OverlayContent> Overlay<C> {
    /// Route a terminal event.
    ///
    pub fn handle_event(&mut self, event: &CrosstermEvent) -> InputOutcome {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(*key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(*mouse),
            CrosstermEvent::Resize(width, height) => {
                self.set_viewport(Rect::new(0, 0, *width, *height));
                InputOutcome::PassThrough
            }
            _ => InputOutcome::PassThrough,
        }
    }

    /// Pointer input. Anything over the underlay is kept from the page;
    /// presses and scrolls there dismiss.
    ///
    pub fn handle_mouse(&mut self, event: MouseEvent) -> InputOutcome {
        let surface = match self.surface() {
            Some(surface) => surface,
            None => return InputOutcome::PassThrough,
        };
        if contains(surface, event.column, event.row) {
            return InputOutcome::PassThrough;
        }
        match event.kind {
            MouseEventKind::Down(_) | MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                self.dismiss(DismissReason::OutsideInteraction);
                InputOutcome::Dismissed
            }
            _ => InputOutcome::Consumed,
        }
    }

    /// Keyboard input. `Esc` dismisses, `Tab`/`BackTab` move focus around the
    /// ring, and `Enter`/`Space` activate a focused dismiss affordance.
    ///
    pub fn handle_key(&mut self, event: KeyEvent) -> InputOutcome {
        let focus = match self.session.as_mut() {
            Some(session) => &mut session.focus,
            None => return InputOutcome::PassThrough,
        };
        if event.kind == KeyEventKind::Release {
            return InputOutcome::Consumed;
        }
        match event.code {
            KeyCode::Esc => {
                self.dismiss(DismissReason::Escape);
                InputOutcome::Dismissed
            }
            KeyCode::BackTab => {
                focus.previous();
                InputOutcome::Consumed
            }
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => {
                focus.previous();
                InputOutcome::Consumed
            }
            KeyCode::Tab => {
                focus.next();
                InputOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char(' ') if focus.current().is_dismiss() => {
                self.dismiss(DismissReason::DismissButton);
                InputOutcome::Dismissed
            }
            _ => match focus.current() {
                FocusTarget::Content(_) => InputOutcome::PassThrough,
                FocusTarget::StartDismiss | FocusTarget::EndDismiss => InputOutcome::Consumed,
            },
        }
    }
}

//! Overlay dismissal module.
//!
//! An `Overlay` is owned by the UI element that triggers it. While a session
//! is open it covers the whole viewport with an invisible underlay, places
//! the popover surface below the trigger, and traps focus between a dismiss
//! affordance at either edge of the content. Closing is idempotent, and
//! dropping the owner force-closes any open session.

mod focus;
mod input;

pub use focus::FocusTarget;
pub use input::InputOutcome;

use focus::FocusRing;
use log::*;
use ratatui::layout::Rect;

/// Gap between the trigger and the popover surface, in cells.
///
const SURFACE_OFFSET_X: u16 = 1;
const SURFACE_OFFSET_Y: u16 = 1;

pub type TriggerId = u64;
pub type SessionId = u64;

/// The element an overlay is opened from.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Trigger {
    pub id: TriggerId,
    pub bounds: Rect,
}

impl Trigger {
    pub fn new(id: TriggerId, bounds: Rect) -> Self {
        Trigger { id, bounds }
    }
}

/// Content hosted inside a popover.
///
pub trait OverlayContent {
    /// Width and height of the popover surface.
    fn size(&self) -> (u16, u16);

    /// Number of focusable items between the two dismiss affordances.
    fn focusable_count(&self) -> usize {
        0
    }
}

/// Stacking layer. Overlays sit above every page layer.
///
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Layer {
    Page,
    Overlay,
}

/// Why a session was closed.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DismissReason {
    Programmatic,
    OutsideInteraction,
    Escape,
    DismissButton,
    TriggerUnmounted,
    Replaced,
}

/// Lifecycle notifications delivered to the listener.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OverlayEvent {
    Opened {
        session: SessionId,
        trigger: TriggerId,
    },
    Closed {
        session: SessionId,
        trigger: TriggerId,
        reason: DismissReason,
    },
}

type Listener = Box<dyn FnMut(&OverlayEvent)>;

struct Session<C> {
    id: SessionId,
    trigger: Trigger,
    content: C,
    surface: Rect,
    focus: FocusRing,
}

/// Controller for a single transient popover.
///
pub struct Overlay<C> {
    viewport: Rect,
    session: Option<Session<C>>,
    next_session: SessionId,
    listener: Option<Listener>,
}

impl<C> Overlay<C> {
    pub fn new(viewport: Rect) -> Self {
        Overlay {
            viewport,
            session: None,
            next_session: 1,
            listener: None,
        }
    }

    /// Install the hook that receives open and close notifications.
    ///
    pub fn with_listener(mut self, listener: impl FnMut(&OverlayEvent) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|session| session.id)
    }

    pub fn trigger(&self) -> Option<&Trigger> {
        self.session.as_ref().map(|session| &session.trigger)
    }

    pub fn content(&self) -> Option<&C> {
        self.session.as_ref().map(|session| &session.content)
    }

    /// Full-viewport area that captures outside interaction while open.
    ///
    pub fn underlay(&self) -> Option<Rect> {
        self.session.as_ref().map(|_| self.viewport)
    }

    pub fn surface(&self) -> Option<Rect> {
        self.session.as_ref().map(|session| session.surface)
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.session.as_ref().map(|session| session.focus.current())
    }

    pub fn layer(&self) -> Layer {
        Layer::Overlay
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Close the open session. Closing a closed overlay is a no-op; returns
    /// whether anything was closed.
    ///
    pub fn close(&mut self) -> bool {
        self.dismiss(DismissReason::Programmatic)
    }

    /// Force-close if the session belongs to the given trigger.
    ///
    pub fn trigger_unmounted(&mut self, trigger: TriggerId) -> bool {
        let owned = self
            .session
            .as_ref()
            .map_or(false, |session| session.trigger.id == trigger);
        owned && self.dismiss(DismissReason::TriggerUnmounted)
    }

    pub(crate) fn dismiss(&mut self, reason: DismissReason) -> bool {
        // Underlay and surface live in the same session value, so taking it
        // tears both down at once.
        let session = match self.session.take() {
            Some(session) => session,
            None => return false,
        };
        debug!(
            "Closing overlay session {} for trigger {} ({:?}).",
            session.id, session.trigger.id, reason
        );
        self.emit(OverlayEvent::Closed {
            session: session.id,
            trigger: session.trigger.id,
            reason,
        });
        true
    }

    fn emit(&mut self, event: OverlayEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}

impl<C: OverlayContent> Overlay<C> {
    /// Open a session for the given trigger, replacing any open one.
    ///
    pub fn open(&mut self, trigger: Trigger, content: C) -> SessionId {
        self.dismiss(DismissReason::Replaced);
        let id = self.next_session;
        self.next_session += 1;
        let surface = place_surface(self.viewport, trigger.bounds, content.size());
        let focus = FocusRing::new(content.focusable_count());
        debug!(
            "Opening overlay session {} for trigger {} at {:?}.",
            id, trigger.id, surface
        );
        self.session = Some(Session {
            id,
            trigger,
            content,
            surface,
            focus,
        });
        self.emit(OverlayEvent::Opened {
            session: id,
            trigger: trigger.id,
        });
        id
    }

    /// Update the viewport, re-placing an open surface.
    ///
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        if let Some(session) = self.session.as_mut() {
            session.surface =
                place_surface(viewport, session.trigger.bounds, session.content.size());
        }
    }
}

impl<C> Drop for Overlay<C> {
    fn drop(&mut self) {
        self.dismiss(DismissReason::TriggerUnmounted);
    }
}

/// Place the surface just below and right of the trigger, clipped to the
/// viewport.
///
fn place_surface(viewport: Rect, trigger: Rect, (width, height): (u16, u16)) -> Rect {
    let x = trigger.x.saturating_add(SURFACE_OFFSET_X);
    let y = trigger.bottom().saturating_add(SURFACE_OFFSET_Y);
    Rect::new(x, y, width, height).intersection(viewport)
}

pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.left() && column < area.right() && row >= area.top() && row < area.bottom()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub(crate) struct Menu {
        pub items: usize,
    }

    impl OverlayContent for Menu {
        fn size(&self) -> (u16, u16) {
            (20, self.items as u16 + 2)
        }

        fn focusable_count(&self) -> usize {
            self.items
        }
    }

    pub(crate) fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    pub(crate) fn trigger() -> Trigger {
        Trigger::new(7, Rect::new(4, 2, 10, 1))
    }

    fn recorded() -> (Overlay<Menu>, Rc<RefCell<Vec<OverlayEvent>>>) {
        let events = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&events);
        let overlay =
            Overlay::new(viewport()).with_listener(move |event| sink.borrow_mut().push(*event));
        (overlay, events)
    }

    #[test]
    fn open_places_surface_below_trigger() {
        let mut overlay = Overlay::new(viewport());
        overlay.open(trigger(), Menu { items: 3 });
        assert!(overlay.is_open());
        assert_eq!(overlay.surface(), Some(Rect::new(5, 4, 20, 5)));
        assert_eq!(overlay.underlay(), Some(viewport()));
        assert_eq!(overlay.focus(), Some(FocusTarget::Content(0)));
        assert!(overlay.layer() > Layer::Page);
    }

    #[test]
    fn surface_is_clipped_to_viewport() {
        let mut overlay = Overlay::new(Rect::new(0, 0, 15, 6));
        overlay.open(trigger(), Menu { items: 3 });
        assert_eq!(overlay.surface(), Some(Rect::new(5, 4, 10, 2)));
    }

    #[test]
    fn close_twice_equals_close_once() {
        let (mut once, once_events) = recorded();
        once.open(trigger(), Menu { items: 1 });
        assert!(once.close());

        let (mut twice, twice_events) = recorded();
        twice.open(trigger(), Menu { items: 1 });
        assert!(twice.close());
        assert!(!twice.close());

        assert_eq!(once.is_open(), twice.is_open());
        assert_eq!(once.surface(), twice.surface());
        assert_eq!(*once_events.borrow(), *twice_events.borrow());
    }

    #[test]
    fn closed_overlay_exposes_no_layers() {
        let mut overlay = Overlay::new(viewport());
        overlay.open(trigger(), Menu { items: 1 });
        overlay.close();
        assert!(overlay.underlay().is_none());
        assert!(overlay.surface().is_none());
        assert!(overlay.focus().is_none());
        assert!(overlay.content().is_none());
    }

    #[test]
    fn listener_sees_open_and_close() {
        let (mut overlay, events) = recorded();
        let session = overlay.open(trigger(), Menu { items: 1 });
        overlay.close();
        assert_eq!(
            *events.borrow(),
            vec![
                OverlayEvent::Opened {
                    session,
                    trigger: 7
                },
                OverlayEvent::Closed {
                    session,
                    trigger: 7,
                    reason: DismissReason::Programmatic
                },
            ]
        );
    }

    #[test]
    fn reopening_replaces_session() {
        let (mut overlay, events) = recorded();
        let first = overlay.open(trigger(), Menu { items: 1 });
        let second = overlay.open(Trigger::new(8, Rect::new(0, 0, 4, 1)), Menu { items: 2 });
        assert_ne!(first, second);
        assert_eq!(overlay.session_id(), Some(second));
        assert_eq!(overlay.trigger().map(|t| t.id), Some(8));
        assert!(events.borrow().contains(&OverlayEvent::Closed {
            session: first,
            trigger: 7,
            reason: DismissReason::Replaced,
        }));
    }

    #[test]
    fn unmounting_trigger_force_closes() {
        let (mut overlay, events) = recorded();
        overlay.open(trigger(), Menu { items: 1 });
        assert!(!overlay.trigger_unmounted(99));
        assert!(overlay.is_open());
        assert!(overlay.trigger_unmounted(7));
        assert!(!overlay.is_open());
        assert!(matches!(
            events.borrow().last(),
            Some(OverlayEvent::Closed {
                reason: DismissReason::TriggerUnmounted,
                ..
            })
        ));
    }

    #[test]
    fn dropping_owner_closes_session() {
        let (mut overlay, events) = recorded();
        overlay.open(trigger(), Menu { items: 1 });
        drop(overlay);
        assert!(matches!(
            events.borrow().last(),
            Some(OverlayEvent::Closed {
                reason: DismissReason::TriggerUnmounted,
                ..
            })
        ));
    }

    #[test]
    fn dropping_closed_overlay_emits_nothing() {
        let (overlay, events) = recorded();
        drop(overlay);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn set_viewport_replaces_surface() {
        let mut overlay = Overlay::new(viewport());
        overlay.open(trigger(), Menu { items: 3 });
        overlay.set_viewport(Rect::new(0, 0, 12, 24));
        assert_eq!(overlay.surface(), Some(Rect::new(5, 4, 7, 5)));
        assert_eq!(overlay.underlay(), Some(Rect::new(0, 0, 12, 24)));
    }
}

//! Focus containment inside an open popover.
//!
//! The ring is `StartDismiss, Content(0..n), EndDismiss` and wraps at both
//! ends, so focus never leaves the popover while it is open.

/// Specifying what holds keyboard focus inside the popover.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FocusTarget {
    StartDismiss,
    Content(usize),
    EndDismiss,
}

impl FocusTarget {
    pub fn is_dismiss(&self) -> bool {
        matches!(self, FocusTarget::StartDismiss | FocusTarget::EndDismiss)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FocusRing {
    items: usize,
    index: usize,
}

impl FocusRing {
    /// Focus starts on the first content item, or the leading dismiss
    /// affordance when there is none.
    ///
    pub(crate) fn new(items: usize) -> Self {
        let index = if items > 0 { 1 } else { 0 };
        FocusRing { items, index }
    }

    fn len(&self) -> usize {
        self.items + 2
    }

    pub(crate) fn current(&self) -> FocusTarget {
        match self.index {
            0 => FocusTarget::StartDismiss,
            i if i > self.items => FocusTarget::EndDismiss,
            i => FocusTarget::Content(i - 1),
        }
    }

    pub(crate) fn next(&mut self) -> FocusTarget {
        self.index = (self.index + 1) % self.len();
        self.current()
    }

    pub(crate) fn previous(&mut self) -> FocusTarget {
        self.index = if self.index == 0 {
            self.len() - 1
        } else {
            self.index - 1
        };
        self.current()
    }
}

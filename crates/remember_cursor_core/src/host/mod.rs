//! Boundary to the host editor.
//!
//! The host owns documents, panes and the live editor. This crate only sees it
//! through the [`Host`] trait and the [`HostEvent`]s it emits, so the restore
//! logic can be driven without a running editor.

mod callback_registry;
mod events;

pub use callback_registry::{CallbackRegistry, SubscriptionId};
pub use events::HostEvent;

use std::path::PathBuf;

use crate::state::{CursorRange, EphemeralState, round_scroll};

/// A host viewport showing (at most) one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneHandle {
    /// Host-assigned pane identifier.
    pub id: String,
    /// Document currently displayed in the pane.
    pub displayed_path: Option<PathBuf>,
}

impl PaneHandle {
    /// Create a pane handle.
    pub fn new(id: impl Into<String>, displayed_path: Option<PathBuf>) -> Self {
        Self {
            id: id.into(),
            displayed_path,
        }
    }

    /// Identity of this pane together with what it shows.
    pub fn token(&self) -> PaneToken {
        PaneToken {
            pane_id: self.id.clone(),
            path: self.displayed_path.clone(),
        }
    }
}

/// Pane id plus displayed document; equal tokens mean "same pane, same file".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneToken {
    /// Host-assigned pane identifier.
    pub pane_id: String,
    /// Document displayed in the pane.
    pub path: Option<PathBuf>,
}

/// Everything this crate needs from the host editor.
///
/// Methods take `&self`; hosts are UI handles with their own interior state.
pub trait Host: Send + Sync {
    /// Path of the active document, if any.
    fn active_document_path(&self) -> Option<PathBuf>;

    /// The pane that most recently had focus.
    fn most_recent_pane(&self) -> Option<PaneHandle>;

    /// All live panes that display documents.
    fn document_panes(&self) -> Vec<PaneHandle>;

    /// Current selection (anchor to head) of the live editor.
    fn selection(&self) -> Option<CursorRange>;

    /// Move the live editor's selection.
    fn set_selection(&self, selection: CursorRange);

    /// Current scroll offset of the live view.
    fn scroll(&self) -> Option<f64>;

    /// Scroll the live view.
    fn set_scroll(&self, scroll: f64);

    /// Whether the host is highlighting a link target it just scrolled to.
    fn is_highlight_navigation_active(&self) -> bool;

    /// Show a short message to the user.
    fn notify(&self, message: &str);
}

/// Read the live editor's state. Scroll is rounded to 4 decimal places.
pub fn capture_state<H: Host + ?Sized>(host: &H) -> EphemeralState {
    EphemeralState {
        cursor: host.selection(),
        scroll: host.scroll().filter(|s| s.is_finite()).map(round_scroll),
    }
}

/// Push a state into the live editor.
///
/// A zero scroll is not applied.
pub fn apply_state<H: Host + ?Sized>(host: &H, state: &EphemeralState) {
    if let Some(cursor) = state.cursor {
        host.set_selection(cursor);
    }
    if let Some(scroll) = state.scroll
        && scroll != 0.0
    {
        host.set_scroll(scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;
    use crate::test_utils::FakeHost;

    #[test]
    fn test_capture_rounds_scroll() {
        let host = FakeHost::showing("Notes.md");
        host.put_selection(CursorRange::collapsed(Position::new(4, 2)));
        host.put_scroll(Some(88.123_456_7));

        let state = capture_state(&host);
        assert_eq!(state.cursor, Some(CursorRange::collapsed(Position::new(4, 2))));
        assert_eq!(state.scroll, Some(88.1235));
    }

    #[test]
    fn test_capture_without_editor() {
        let host = FakeHost::empty();
        assert!(capture_state(&host).is_empty());
    }

    #[test]
    fn test_apply_skips_zero_scroll() {
        let host = FakeHost::showing("Notes.md");
        apply_state(
            &host,
            &EphemeralState {
                cursor: Some(CursorRange::collapsed(Position::new(1, 1))),
                scroll: Some(0.0),
            },
        );
        assert_eq!(host.selection_writes(), 1);
        assert_eq!(host.scroll_writes(), 0);
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let host = FakeHost::showing("Notes.md");
        let state = EphemeralState {
            cursor: Some(CursorRange::new(Position::new(3, 0), Position::new(5, 2))),
            scroll: Some(64.0),
        };

        apply_state(&host, &state);
        let once = capture_state(&host);
        apply_state(&host, &state);
        assert_eq!(capture_state(&host), once);
        assert_eq!(once, state);
    }

    #[test]
    fn test_pane_token_identity() {
        let a = PaneHandle::new("pane-1", Some(PathBuf::from("a.md")));
        let b = PaneHandle::new("pane-1", Some(PathBuf::from("b.md")));
        assert_eq!(a.token(), a.clone().token());
        assert_ne!(a.token(), b.token());
    }
}

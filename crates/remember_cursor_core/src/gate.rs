//! Deciding whether a "document opened" event needs a restore.
//!
//! Hosts fire open events far more often than a document actually needs its
//! state restored: on every pane re-render, split and tab switch. The gate
//! turns that stream into "restore at most once per (pane, file) pairing".
//!
//! [`OpenEventGate::admit`] is pure: it only looks at an [`OpenEventSnapshot`]
//! of the host, so it can be exercised without one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::host::{Host, PaneHandle, PaneToken};

/// What the gate needs to know about the host when an open event arrives.
#[derive(Debug, Clone, Default)]
pub struct OpenEventSnapshot {
    /// Path of the active document.
    pub active_path: Option<PathBuf>,
    /// The most recently focused pane.
    pub most_recent_pane: Option<PaneHandle>,
    /// Every live document pane.
    pub panes: Vec<PaneHandle>,
}

impl OpenEventSnapshot {
    /// Query the host.
    pub fn capture<H: Host + ?Sized>(host: &H) -> Self {
        Self {
            active_path: host.active_document_path(),
            most_recent_pane: host.most_recent_pane(),
            panes: host.document_panes(),
        }
    }
}

/// Result of [`OpenEventGate::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// A restore for this very path is already running.
    Absorbed,
    /// The focused pane already went through a restore for the file it shows.
    AlreadyRestored,
    /// The active document is the one most recently processed.
    Unchanged,
    /// Nothing is active.
    NoActiveDocument,
    /// Restore this path. The gate is now in progress until [`OpenEventGate::finish`].
    Restore(PathBuf),
}

/// Bookkeeping for open-event deduplication.
#[derive(Debug, Default)]
pub struct OpenEventGate {
    last_path: Option<PathBuf>,
    in_progress: bool,
    accounted: HashSet<PaneToken>,
}

impl OpenEventGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what to do with an open event.
    pub fn admit(&mut self, snapshot: &OpenEventSnapshot) -> GateDecision {
        if let Some(path) = &snapshot.active_path
            && self.in_progress
            && self.last_path.as_ref() == Some(path)
        {
            return GateDecision::Absorbed;
        }

        if let Some(pane) = &snapshot.most_recent_pane
            && self.accounted.contains(&pane.token())
        {
            return GateDecision::AlreadyRestored;
        }

        self.accounted.clear();
        self.accounted
            .extend(snapshot.panes.iter().map(PaneHandle::token));

        if self.last_path == snapshot.active_path {
            return GateDecision::Unchanged;
        }
        self.last_path = snapshot.active_path.clone();

        match &snapshot.active_path {
            Some(path) => {
                self.in_progress = true;
                GateDecision::Restore(path.clone())
            }
            None => GateDecision::NoActiveDocument,
        }
    }

    /// Mark the running restore as done.
    pub fn finish(&mut self) {
        self.in_progress = false;
    }

    /// Whether a restore is running.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// The path most recently admitted.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Whether `pane` showing its current file is already accounted for.
    pub fn is_accounted(&self, pane: &PaneHandle) -> bool {
        self.accounted.contains(&pane.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(id: &str, path: &str) -> PaneHandle {
        PaneHandle::new(id, Some(PathBuf::from(path)))
    }

    fn snapshot(active: &str, focused: PaneHandle, panes: Vec<PaneHandle>) -> OpenEventSnapshot {
        OpenEventSnapshot {
            active_path: Some(PathBuf::from(active)),
            most_recent_pane: Some(focused),
            panes,
        }
    }

    #[test]
    fn test_first_open_restores() {
        let mut gate = OpenEventGate::new();
        let p = pane("p1", "Notes.md");
        let decision = gate.admit(&snapshot("Notes.md", p.clone(), vec![p.clone()]));

        assert_eq!(decision, GateDecision::Restore(PathBuf::from("Notes.md")));
        assert!(gate.is_in_progress());
        assert!(gate.is_accounted(&p));
        assert_eq!(gate.last_path(), Some(Path::new("Notes.md")));
    }

    #[test]
    fn test_same_path_in_progress_is_absorbed() {
        let mut gate = OpenEventGate::new();
        let p = pane("p1", "Notes.md");
        let snap = snapshot("Notes.md", p.clone(), vec![p]);
        gate.admit(&snap);

        assert_eq!(gate.admit(&snap), GateDecision::Absorbed);
    }

    #[test]
    fn test_refocus_after_restore_is_skipped() {
        let mut gate = OpenEventGate::new();
        let p = pane("p1", "Notes.md");
        let snap = snapshot("Notes.md", p.clone(), vec![p]);
        gate.admit(&snap);
        gate.finish();

        assert_eq!(gate.admit(&snap), GateDecision::AlreadyRestored);
    }

    #[test]
    fn test_switching_file_in_same_pane_restores() {
        let mut gate = OpenEventGate::new();
        let first = pane("p1", "Notes.md");
        gate.admit(&snapshot("Notes.md", first.clone(), vec![first]));
        gate.finish();

        let second = pane("p1", "Todo.md");
        assert_eq!(
            gate.admit(&snapshot("Todo.md", second.clone(), vec![second])),
            GateDecision::Restore(PathBuf::from("Todo.md"))
        );
    }

    #[test]
    fn test_new_pane_on_same_file_is_unchanged() {
        let mut gate = OpenEventGate::new();
        let p1 = pane("p1", "Notes.md");
        gate.admit(&snapshot("Notes.md", p1.clone(), vec![p1.clone()]));
        gate.finish();

        // Split: a second pane shows the same document.
        let p2 = pane("p2", "Notes.md");
        let decision = gate.admit(&snapshot("Notes.md", p2.clone(), vec![p1, p2.clone()]));
        assert_eq!(decision, GateDecision::Unchanged);
        assert!(!gate.is_in_progress());
        assert!(gate.is_accounted(&p2));
    }

    #[test]
    fn test_token_set_is_rebuilt_not_accumulated() {
        let mut gate = OpenEventGate::new();
        let p1 = pane("p1", "Notes.md");
        gate.admit(&snapshot("Notes.md", p1.clone(), vec![p1.clone()]));
        gate.finish();

        let p1_todo = pane("p1", "Todo.md");
        gate.admit(&snapshot("Todo.md", p1_todo.clone(), vec![p1_todo]));
        gate.finish();

        assert!(!gate.is_accounted(&p1));
    }

    #[test]
    fn test_no_active_document() {
        let mut gate = OpenEventGate::new();
        let p1 = pane("p1", "Notes.md");
        gate.admit(&snapshot("Notes.md", p1.clone(), vec![p1]));
        gate.finish();

        let decision = gate.admit(&OpenEventSnapshot::default());
        assert_eq!(decision, GateDecision::NoActiveDocument);
        assert!(!gate.is_in_progress());
        assert_eq!(gate.last_path(), None);
    }
}

//! Test utilities for remember_cursor_core
//!
//! This module provides shared testing infrastructure: a mock filesystem and a
//! fake host editor that records what was done to it.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::fs::FileSystem;
use crate::host::{Host, PaneHandle};
use crate::state::CursorRange;

/// A mock filesystem for testing.
///
/// Uses `Arc<Mutex<HashMap>>` for thread-safety and allows cloning
/// while sharing the same underlying file storage.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock filesystem (builder pattern).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    /// Get the content of a file (for test assertions).
    pub fn get_content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&PathBuf::from(path))
            .cloned()
    }

    /// Make every subsequent write fail with a permission error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Read-only filesystem",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        // Mock implementation - directories are implicit
        Ok(())
    }
}

/// A fake host editor.
///
/// Panes, the active document and the live editor are plain fields; every
/// selection/scroll write and every notice is recorded.
#[derive(Default)]
pub struct FakeHost {
    active: Mutex<Option<PathBuf>>,
    panes: Mutex<Vec<PaneHandle>>,
    focused: Mutex<Option<String>>,
    selection: Mutex<Option<CursorRange>>,
    scroll: Mutex<Option<f64>>,
    highlight: AtomicBool,
    selection_writes: AtomicUsize,
    scroll_writes: AtomicUsize,
    notices: Mutex<Vec<String>>,
}

impl FakeHost {
    /// A host with no panes and no active document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A host with one pane (`pane-1`) showing `path`, focused and active.
    pub fn showing(path: &str) -> Self {
        let host = Self::default();
        host.open_in_pane("pane-1", path);
        host
    }

    /// Show `path` in pane `pane_id` (creating the pane), focus it and make it active.
    pub fn open_in_pane(&self, pane_id: &str, path: &str) {
        let mut panes = self.panes.lock().unwrap();
        let pane = PaneHandle::new(pane_id, Some(PathBuf::from(path)));
        match panes.iter_mut().find(|p| p.id == pane_id) {
            Some(existing) => *existing = pane,
            None => panes.push(pane),
        }
        *self.focused.lock().unwrap() = Some(pane_id.to_string());
        *self.active.lock().unwrap() = Some(PathBuf::from(path));
    }

    /// Set the live selection without counting it as a restore write.
    pub fn put_selection(&self, selection: CursorRange) {
        *self.selection.lock().unwrap() = Some(selection);
    }

    /// Set the live scroll without counting it as a restore write.
    pub fn put_scroll(&self, scroll: Option<f64>) {
        *self.scroll.lock().unwrap() = scroll;
    }

    /// Move the live selection down `lines` lines, as an editor does when
    /// lines are inserted above it.
    pub fn shift_lines(&self, lines: u32) {
        let mut selection = self.selection.lock().unwrap();
        if let Some(range) = selection.as_mut() {
            range.from.line += lines;
            range.to.line += lines;
        }
    }

    /// Turn the link-highlight indicator on or off.
    pub fn set_highlight(&self, active: bool) {
        self.highlight.store(active, Ordering::SeqCst);
    }

    /// Number of `set_selection` calls.
    pub fn selection_writes(&self) -> usize {
        self.selection_writes.load(Ordering::SeqCst)
    }

    /// Number of `set_scroll` calls.
    pub fn scroll_writes(&self) -> usize {
        self.scroll_writes.load(Ordering::SeqCst)
    }

    /// Notices shown so far.
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Host for FakeHost {
    fn active_document_path(&self) -> Option<PathBuf> {
        self.active.lock().unwrap().clone()
    }

    fn most_recent_pane(&self) -> Option<PaneHandle> {
        let focused = self.focused.lock().unwrap().clone()?;
        self.panes
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == focused)
            .cloned()
    }

    fn document_panes(&self) -> Vec<PaneHandle> {
        self.panes.lock().unwrap().clone()
    }

    fn selection(&self) -> Option<CursorRange> {
        *self.selection.lock().unwrap()
    }

    fn set_selection(&self, selection: CursorRange) {
        self.selection_writes.fetch_add(1, Ordering::SeqCst);
        *self.selection.lock().unwrap() = Some(selection);
    }

    fn scroll(&self) -> Option<f64> {
        *self.scroll.lock().unwrap()
    }

    fn set_scroll(&self, scroll: f64) {
        self.scroll_writes.fetch_add(1, Ordering::SeqCst);
        *self.scroll.lock().unwrap() = Some(scroll);
    }

    fn is_highlight_navigation_active(&self) -> bool {
        self.highlight.load(Ordering::SeqCst)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

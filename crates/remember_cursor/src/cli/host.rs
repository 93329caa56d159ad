//! A single markdown file standing in for an open editor.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use remember_cursor_core::{CursorRange, Host, PaneHandle};

const PANE_ID: &str = "cli";

/// One pane showing one file. Selection and scroll live in memory.
pub struct FileHost {
    path: PathBuf,
    selection: Mutex<Option<CursorRange>>,
    scroll: Mutex<Option<f64>>,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            selection: Mutex::new(None),
            scroll: Mutex::new(None),
        }
    }

    pub fn with_selection(self, selection: CursorRange) -> Self {
        *self.selection.lock().unwrap_or_else(PoisonError::into_inner) = Some(selection);
        self
    }

    pub fn with_scroll(self, scroll: Option<f64>) -> Self {
        *self.scroll.lock().unwrap_or_else(PoisonError::into_inner) = scroll;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Host for FileHost {
    fn active_document_path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }

    fn most_recent_pane(&self) -> Option<PaneHandle> {
        Some(PaneHandle::new(PANE_ID, Some(self.path.clone())))
    }

    fn document_panes(&self) -> Vec<PaneHandle> {
        self.most_recent_pane().into_iter().collect()
    }

    fn selection(&self) -> Option<CursorRange> {
        *self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_selection(&self, selection: CursorRange) {
        *self.selection.lock().unwrap_or_else(PoisonError::into_inner) = Some(selection);
    }

    fn scroll(&self) -> Option<f64> {
        *self.scroll.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_scroll(&self, scroll: f64) {
        *self.scroll.lock().unwrap_or_else(PoisonError::into_inner) = Some(scroll);
    }

    // There is no rendered view to navigate.
    fn is_highlight_navigation_active(&self) -> bool {
        false
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

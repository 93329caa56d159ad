//! Ephemeral view state of a document.
//!
//! An [`EphemeralState`] is what gets remembered between sessions: where the
//! selection was and how far the view was scrolled. Either part may be
//! missing, which means "leave that aspect alone" on restore.
//!
//! Cursor lines held in these types are always absolute within the whole
//! document. The block-relative form only exists in frontmatter; see
//! [`crate::codec`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A position in the document: zero-based line and character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Zero-based line index.
    pub line: u32,
    /// Zero-based character offset within the line.
    pub ch: u32,
}

impl Position {
    /// Create a position.
    pub fn new(line: u32, ch: u32) -> Self {
        Self { line, ch }
    }
}

/// A selection from anchor (`from`) to head (`to`). Collapsed when both are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CursorRange {
    /// Selection anchor.
    pub from: Position,
    /// Selection head.
    pub to: Position,
}

impl CursorRange {
    /// Create a selection range.
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// A collapsed cursor at `at`.
    pub fn collapsed(at: Position) -> Self {
        Self { from: at, to: at }
    }
}

/// Cursor/selection and scroll offset of one document.
///
/// `PartialEq` is exact structural equality. Use [`EphemeralState::is_equivalent`]
/// when deciding whether a stored state needs rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EphemeralState {
    /// Selection, in absolute document lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorRange>,
    /// Vertical scroll offset in the host's native units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<f64>,
}

impl EphemeralState {
    /// Whether neither a cursor nor a scroll offset is recorded.
    pub fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.scroll.is_none()
    }

    /// Equivalence used to suppress no-op writes.
    ///
    /// Cursors compare field by field and must be both present or both absent.
    /// Scroll offsets compare the same way, except that a scroll of exactly `0`
    /// counts as "no scroll recorded": `{scroll: 0}` is equivalent to `{}`.
    pub fn is_equivalent(&self, other: &EphemeralState) -> bool {
        let cursors_match = match (&self.cursor, &other.cursor) {
            (Some(a), Some(b)) => {
                a.from.ch == b.from.ch
                    && a.from.line == b.from.line
                    && a.to.ch == b.to.ch
                    && a.to.line == b.to.line
            }
            (None, None) => true,
            _ => false,
        };
        if !cursors_match {
            return false;
        }

        match (recorded_scroll(self.scroll), recorded_scroll(other.scroll)) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

/// A scroll value that counts as recorded for equivalence: present, non-zero, not NaN.
fn recorded_scroll(scroll: Option<f64>) -> Option<f64> {
    scroll.filter(|s| *s != 0.0 && !s.is_nan())
}

/// Round a scroll offset to 4 decimal places.
pub fn round_scroll(scroll: f64) -> f64 {
    (scroll * 10_000.0).round() / 10_000.0
}

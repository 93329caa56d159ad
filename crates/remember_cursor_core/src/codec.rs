//! Conversion between [`EphemeralState`] and frontmatter fields.
//!
//! Stored cursor lines count from the first line after the frontmatter block;
//! in-memory lines are absolute. Both directions need the block's current
//! line extent (see [`crate::frontmatter::ParsedFile::block_line_count`]).
//!
//! On disk the state looks like:
//!
//! ```yaml
//! cursor:
//!   from:
//!     ch: 5
//!     line: 2
//!   to:
//!     ch: 5
//!     line: 2
//! scroll: 120.5
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::Result;
use crate::frontmatter::Frontmatter;
use crate::state::{CursorRange, EphemeralState, Position};

/// Frontmatter key holding the selection.
pub const CURSOR_KEY: &str = "cursor";

/// Frontmatter key holding the scroll offset.
pub const SCROLL_KEY: &str = "scroll";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredPosition {
    ch: u32,
    line: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredCursor {
    from: StoredPosition,
    to: StoredPosition,
}

/// Decode the stored state from a document's frontmatter.
///
/// Returns `None` when neither `cursor` nor `scroll` is stored, and also when
/// either one is malformed (missing sub-fields, non-numeric values). A bad
/// position is never handed to the editor.
pub fn decode(frontmatter: &Frontmatter, block_line_count: u32) -> Option<EphemeralState> {
    let cursor = stored(frontmatter, CURSOR_KEY);
    let scroll = stored(frontmatter, SCROLL_KEY);
    if cursor.is_none() && scroll.is_none() {
        return None;
    }

    let cursor = match cursor {
        Some(value) => match serde_yaml::from_value::<StoredCursor>(value.clone()) {
            Ok(stored) => Some(CursorRange::new(
                to_absolute(stored.from, block_line_count),
                to_absolute(stored.to, block_line_count),
            )),
            Err(e) => {
                log::warn!("Ignoring malformed stored cursor: {}", e);
                return None;
            }
        },
        None => None,
    };

    let scroll = match scroll {
        Some(value) => match value.as_f64() {
            Some(scroll) => Some(scroll),
            None => {
                log::warn!("Ignoring non-numeric stored scroll: {:?}", value);
                return None;
            }
        },
        None => None,
    };

    Some(EphemeralState { cursor, scroll })
}

/// Encode a state into a frontmatter patch.
///
/// Only the aspects present in `state` appear in the patch; merge it onto the
/// existing frontmatter with [`crate::frontmatter::merge`]. Lines that fall
/// inside the block are floored to 0, and a floored line loses its character
/// offset.
pub fn encode(state: &EphemeralState, block_line_count: u32) -> Result<Frontmatter> {
    let mut patch = Frontmatter::new();

    if let Some(cursor) = state.cursor {
        let stored = StoredCursor {
            from: to_relative(cursor.from, block_line_count),
            to: to_relative(cursor.to, block_line_count),
        };
        patch.insert(CURSOR_KEY.to_string(), serde_yaml::to_value(stored)?);
    }

    if let Some(scroll) = state.scroll {
        patch.insert(SCROLL_KEY.to_string(), Value::from(scroll));
    }

    Ok(patch)
}

/// A key counts as stored when present and not null.
fn stored<'a>(frontmatter: &'a Frontmatter, key: &str) -> Option<&'a Value> {
    frontmatter.get(key).filter(|v| !v.is_null())
}

fn to_absolute(stored: StoredPosition, block_line_count: u32) -> Position {
    Position::new(stored.line.saturating_add(block_line_count), stored.ch)
}

fn to_relative(position: Position, block_line_count: u32) -> StoredPosition {
    let line = position.line.saturating_sub(block_line_count);
    let ch = if line == 0 { 0 } else { position.ch };
    StoredPosition { ch, line }
}

//! Manual save and restore.
//!
//! Both commands act on the active document right away: no open-event
//! gating, no delay, no highlight check. Failures never propagate; they are
//! logged and reported to the user as a notice.

use serde::{Deserialize, Serialize};
use std::path::Path;
use ts_rs::TS;

use crate::codec;
use crate::error::Result;
use crate::frontmatter;
use crate::host::{Host, apply_state, capture_state};
use crate::metadata::MetadataStore;
use crate::state::EphemeralState;

/// Notice shown after a successful save.
pub const SAVED_NOTICE: &str = "Position & selection saved to frontmatter";
/// Notice shown after a successful restore.
pub const RESTORED_NOTICE: &str = "Position & selection restored from frontmatter";
/// Notice shown when restoring a document with nothing stored.
pub const NOTHING_SAVED_NOTICE: &str = "No saved position & selection in frontmatter";
/// Notice shown when writing the frontmatter failed.
pub const SAVE_FAILED_NOTICE: &str = "Failed to update cursor position information in frontmatter";
/// Notice shown when reading the frontmatter failed.
pub const RESTORE_FAILED_NOTICE: &str = "Failed to read cursor position information from frontmatter";

/// Commands the plugin registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "kebab-case")]
pub enum CommandId {
    /// Save position & selection of the active document.
    SaveCurrentPosition,
    /// Restore position & selection of the active document.
    RestoreSavedPosition,
}

impl CommandId {
    /// Every command, in registration order.
    pub const ALL: [CommandId; 2] = [Self::SaveCurrentPosition, Self::RestoreSavedPosition];

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SaveCurrentPosition => "save-current-position",
            Self::RestoreSavedPosition => "restore-saved-position",
        }
    }

    /// Display name for the command palette.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaveCurrentPosition => "Save position & selection",
            Self::RestoreSavedPosition => "Restore position & selection",
        }
    }
}

/// What a manual command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// No document is active; nothing happened.
    NoActiveDocument,
    /// The editor had neither a selection nor a scroll offset; nothing was written.
    NothingToSave,
    /// The state was captured. `written` is false when the stored state was already equivalent.
    Saved {
        /// Captured state, absolute lines.
        state: EphemeralState,
        /// Whether the frontmatter was rewritten.
        written: bool,
    },
    /// Writing the frontmatter failed.
    SaveFailed,
    /// The stored state was applied.
    Restored(EphemeralState),
    /// Nothing was stored for the document.
    NothingSaved,
    /// Reading the frontmatter failed.
    RestoreFailed,
}

/// Capture the live editor state and store it in the active document's frontmatter.
pub async fn save_current_position<H, S>(host: &H, store: &S) -> CommandOutcome
where
    H: Host + ?Sized,
    S: MetadataStore + ?Sized,
{
    let Some(path) = host.active_document_path() else {
        return CommandOutcome::NoActiveDocument;
    };

    let state = capture_state(host);
    if state.is_empty() {
        log::debug!("No editor state to save for '{}'", path.display());
        return CommandOutcome::NothingToSave;
    }

    match store_state(store, &path, &state).await {
        Ok(written) => {
            host.notify(SAVED_NOTICE);
            CommandOutcome::Saved { state, written }
        }
        Err(e) => {
            log::error!(
                "Save cursor position error when updating frontmatter of '{}': {}",
                path.display(),
                e
            );
            host.notify(SAVE_FAILED_NOTICE);
            CommandOutcome::SaveFailed
        }
    }
}

/// Apply the state stored in the active document's frontmatter immediately.
pub async fn restore_saved_position<H, S>(host: &H, store: &S) -> CommandOutcome
where
    H: Host + ?Sized,
    S: MetadataStore + ?Sized,
{
    let Some(path) = host.active_document_path() else {
        return CommandOutcome::NoActiveDocument;
    };

    let metadata = match store.read_metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!("Failed to read frontmatter of '{}': {}", path.display(), e);
            host.notify(RESTORE_FAILED_NOTICE);
            return CommandOutcome::RestoreFailed;
        }
    };

    match codec::decode(&metadata.frontmatter, metadata.block_line_count) {
        Some(state) => {
            apply_state(host, &state);
            host.notify(RESTORED_NOTICE);
            CommandOutcome::Restored(state)
        }
        None => {
            host.notify(NOTHING_SAVED_NOTICE);
            CommandOutcome::NothingSaved
        }
    }
}

/// Write `state` into the frontmatter of `path`.
///
/// Lines are made relative to the block as it is before the write. Returns
/// `Ok(false)` without writing when `state` is empty or the stored state is
/// already equivalent.
pub async fn store_state<S: MetadataStore + ?Sized>(
    store: &S,
    path: &Path,
    state: &EphemeralState,
) -> Result<bool> {
    if state.is_empty() {
        return Ok(false);
    }

    let current = store.read_metadata(path).await?;
    if let Some(stored) = codec::decode(&current.frontmatter, current.block_line_count)
        && stored.is_equivalent(state)
    {
        log::debug!("Stored state of '{}' is unchanged", path.display());
        return Ok(false);
    }

    let patch = codec::encode(state, current.block_line_count)?;
    store
        .update_metadata(path, Box::new(move |fm| frontmatter::merge(fm, patch)))
        .await?;
    Ok(true)
}

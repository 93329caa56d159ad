//! `save`, `restore` and `show` command handlers

use std::path::Path;

use remember_cursor_core::commands::{self, CommandOutcome, NOTHING_SAVED_NOTICE};
use remember_cursor_core::fs::RealFileSystem;
use remember_cursor_core::orchestrator::RestoreOutcome;
use remember_cursor_core::{
    CursorMemory, CursorRange, EphemeralState, EventOutcome, HostEvent, MetadataStore, decode,
};

use crate::cli::host::FileHost;
use crate::cli::{AsyncFs, CliStore};

/// Store `selection` and `scroll` in the frontmatter of `file`.
pub async fn handle_save(
    store: &CliStore,
    file: &Path,
    selection: CursorRange,
    scroll: Option<f64>,
) -> bool {
    let host = FileHost::new(file)
        .with_selection(selection)
        .with_scroll(scroll);

    match commands::save_current_position(&host, store).await {
        CommandOutcome::Saved { written, .. } => {
            if !written {
                log::info!("'{}' already stores this position", file.display());
            }
            true
        }
        _ => false,
    }
}

/// Restore the stored state of `file` right away and print it.
pub async fn handle_restore(store: &CliStore, file: &Path) -> bool {
    let host = FileHost::new(file);
    match commands::restore_saved_position(&host, store).await {
        CommandOutcome::Restored(state) => print_state(&state),
        CommandOutcome::NothingSaved => true,
        _ => false,
    }
}

/// Restore `file` the way the plugin does when a document opens: wait for the
/// configured delay, check for link navigation, then apply.
pub async fn handle_restore_on_open(store: CliStore, file: &Path, settings_path: &Path) -> bool {
    let mut plugin = CursorMemory::load(
        FileHost::new(file),
        store,
        AsyncFs::new(RealFileSystem),
        settings_path,
    )
    .await;
    log::debug!(
        "Restoring '{}' after {} ms",
        plugin.host().path().display(),
        plugin.config().delay_after_file_opening
    );

    match plugin.handle_event(HostEvent::document_opened(file)).await {
        Ok(EventOutcome::Restore(RestoreOutcome::Applied(state))) => print_state(&state),
        Ok(EventOutcome::Restore(RestoreOutcome::NothingStored)) => {
            println!("{}", NOTHING_SAVED_NOTICE);
            true
        }
        Ok(outcome) => {
            log::info!("Nothing restored: {:?}", outcome);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Print what `file` stores, with lines made absolute.
pub async fn handle_show(store: &CliStore, file: &Path) -> bool {
    let metadata = match store.read_metadata(file).await {
        Ok(metadata) => metadata,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    let state = decode(&metadata.frontmatter, metadata.block_line_count);
    let report = serde_json::json!({
        "file": file,
        "block_line_count": metadata.block_line_count,
        "state": state,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

fn print_state(state: &EphemeralState) -> bool {
    match serde_json::to_string_pretty(state) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

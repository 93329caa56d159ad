//! Restoring a document's state after it opens.
//!
//! One restore attempt walks `Idle → Loading → Waiting → FlashCheck →
//! Applying → Idle`, leaving early when nothing is stored or when the host is
//! busy with its own link navigation. The two waits are the only suspension
//! points. While an attempt is running, further open events for the same path
//! are absorbed by the [`OpenEventGate`].

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::codec;
use crate::config::Config;
use crate::error::Result;
use crate::gate::{GateDecision, OpenEventGate, OpenEventSnapshot};
use crate::host::{Host, apply_state};
use crate::metadata::MetadataStore;
use crate::state::EphemeralState;

/// Pause between the highlight check and applying the state.
pub const FLASH_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Where the current restore attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePhase {
    /// No attempt running.
    #[default]
    Idle,
    /// Reading and decoding the stored state.
    Loading,
    /// Waiting for the host to finish loading the document.
    Waiting,
    /// Checking for host link navigation.
    FlashCheck,
    /// Writing the state into the live editor.
    Applying,
}

/// How an open event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// A restore for the same path was already running.
    Absorbed,
    /// The focused pane was already restored for the file it shows.
    AlreadyRestored,
    /// The active document did not change.
    Unchanged,
    /// No document is active.
    NoActiveDocument,
    /// The document has no stored state.
    NothingStored,
    /// The host was highlighting a link target; nothing was applied.
    YieldedToNavigation,
    /// The stored state was applied.
    Applied(EphemeralState),
}

#[derive(Debug, Default)]
struct Inner {
    gate: OpenEventGate,
    phase: RestorePhase,
}

/// Drives restore attempts for "document opened" events.
#[derive(Debug)]
pub struct RestoreOrchestrator {
    inner: Mutex<Inner>,
    after_open: Duration,
    flash_settle: Duration,
}

impl RestoreOrchestrator {
    /// Create an idle orchestrator waiting `config.delay_after_file_opening` after each open.
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            after_open: config.after_open_delay(),
            flash_settle: FLASH_SETTLE_DELAY,
        }
    }

    /// Override the pause between the highlight check and applying.
    pub fn with_flash_settle(mut self, flash_settle: Duration) -> Self {
        self.flash_settle = flash_settle;
        self
    }

    /// Wait after a document opens.
    pub fn after_open_delay(&self) -> Duration {
        self.after_open
    }

    /// Change the wait after a document opens. Takes effect on the next attempt.
    pub fn set_after_open_delay(&mut self, delay: Duration) {
        self.after_open = delay;
    }

    /// Current phase.
    pub fn phase(&self) -> RestorePhase {
        self.lock().phase
    }

    /// Whether an attempt is running.
    pub fn is_in_progress(&self) -> bool {
        self.lock().gate.is_in_progress()
    }

    /// The path most recently admitted by the gate.
    pub fn last_path(&self) -> Option<PathBuf> {
        self.lock().gate.last_path().map(PathBuf::from)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, phase: RestorePhase) {
        self.lock().phase = phase;
    }

    /// Handle a "document opened" event.
    ///
    /// Errors come only from reading the document's metadata; the gate is
    /// reset either way.
    pub async fn handle_document_opened<H, S>(&self, host: &H, store: &S) -> Result<RestoreOutcome>
    where
        H: Host + ?Sized,
        S: MetadataStore + ?Sized,
    {
        let snapshot = OpenEventSnapshot::capture(host);
        let decision = self.lock().gate.admit(&snapshot);
        let path = match decision {
            GateDecision::Restore(path) => path,
            GateDecision::Absorbed => {
                log::debug!("Restore already in progress, absorbing open event");
                return Ok(RestoreOutcome::Absorbed);
            }
            GateDecision::AlreadyRestored => return Ok(RestoreOutcome::AlreadyRestored),
            GateDecision::Unchanged => return Ok(RestoreOutcome::Unchanged),
            GateDecision::NoActiveDocument => return Ok(RestoreOutcome::NoActiveDocument),
        };

        let _attempt = Attempt(self);

        self.enter(RestorePhase::Loading);
        let metadata = store.read_metadata(&path).await?;
        let Some(state) = codec::decode(&metadata.frontmatter, metadata.block_line_count) else {
            log::debug!("No stored state for '{}'", path.display());
            return Ok(RestoreOutcome::NothingStored);
        };

        self.enter(RestorePhase::Waiting);
        tokio::time::sleep(self.after_open).await;

        self.enter(RestorePhase::FlashCheck);
        if host.is_highlight_navigation_active() {
            log::debug!(
                "Host is navigating to a link target in '{}', skipping restore",
                path.display()
            );
            return Ok(RestoreOutcome::YieldedToNavigation);
        }
        tokio::time::sleep(self.flash_settle).await;

        self.enter(RestorePhase::Applying);
        apply_state(host, &state);
        log::info!("Restored position & selection of '{}'", path.display());
        Ok(RestoreOutcome::Applied(state))
    }
}

/// Returns the orchestrator to idle when an attempt ends, however it ends.
struct Attempt<'a>(&'a RestoreOrchestrator);

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        let mut inner = self.0.lock();
        inner.gate.finish();
        inner.phase = RestorePhase::Idle;
    }
}

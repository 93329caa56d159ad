//! The plugin as a whole.
//!
//! [`CursorMemory`] owns the host handle, the metadata store, the settings and
//! the [`RestoreOrchestrator`]. The host talks to it through a
//! [`CallbackRegistry`]: [`CursorMemory::register`] subscribes a callback that
//! forwards every [`HostEvent`] into a channel, and [`CursorMemory::run`]
//! handles them one at a time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::commands::{self, CommandId, CommandOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::fs::AsyncFileSystem;
use crate::host::{CallbackRegistry, Host, HostEvent, SubscriptionId};
use crate::metadata::MetadataStore;
use crate::orchestrator::{RestoreOrchestrator, RestoreOutcome};

/// What handling one [`HostEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// A document-opened event went through the orchestrator.
    Restore(RestoreOutcome),
    /// A command ran.
    Command(CommandOutcome),
    /// The delay setting was changed and saved.
    SettingsSaved,
}

/// Remembers cursor, selection and scroll per document.
pub struct CursorMemory<H, S, FS> {
    host: H,
    store: S,
    settings_fs: FS,
    settings_path: PathBuf,
    config: Config,
    orchestrator: RestoreOrchestrator,
}

impl<H, S, FS> CursorMemory<H, S, FS>
where
    H: Host,
    S: MetadataStore,
    FS: AsyncFileSystem,
{
    /// Create the plugin, loading settings from `settings_path`.
    ///
    /// Missing or unreadable settings fall back to the defaults.
    pub async fn load(host: H, store: S, settings_fs: FS, settings_path: impl Into<PathBuf>) -> Self {
        let settings_path = settings_path.into();
        let config = Config::load_from_or_default(&settings_fs, &settings_path).await;
        log::debug!(
            "Loaded settings from '{}': {:?}",
            settings_path.display(),
            config
        );
        Self::with_config(host, store, settings_fs, settings_path, config)
    }

    /// Create the plugin with the given settings.
    pub fn with_config(
        host: H,
        store: S,
        settings_fs: FS,
        settings_path: impl Into<PathBuf>,
        config: Config,
    ) -> Self {
        let orchestrator = RestoreOrchestrator::new(&config);
        Self {
            host,
            store,
            settings_fs,
            settings_path: settings_path.into(),
            config,
            orchestrator,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where settings are saved.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// The host handle.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The metadata store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The restore state machine.
    pub fn orchestrator(&self) -> &RestoreOrchestrator {
        &self.orchestrator
    }

    /// Subscribe to `registry` and return the receiving end for [`run`](Self::run).
    pub fn register(
        &self,
        registry: &CallbackRegistry,
    ) -> (SubscriptionId, UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = registry.subscribe(Arc::new(move |event: &HostEvent| {
            if tx.send(event.clone()).is_err() {
                log::debug!("Plugin stopped, dropping {} event", event.event_type());
            }
        }));

        for command in CommandId::ALL {
            log::debug!("Registered command '{}' ({})", command.name(), command.id());
        }
        (id, rx)
    }

    /// Restore whatever document is already active when the plugin starts.
    pub async fn on_load(&self) -> Result<RestoreOutcome> {
        log::info!("Loading remember-cursor");
        self.orchestrator
            .handle_document_opened(&self.host, &self.store)
            .await
    }

    /// Handle events until every sender is gone.
    pub async fn run(&mut self, mut events: UnboundedReceiver<HostEvent>) {
        while let Some(event) = events.recv().await {
            let kind = event.event_type();
            match self.handle_event(event).await {
                Ok(outcome) => log::trace!("{} handled: {:?}", kind, outcome),
                Err(e) => log::error!("Failed to handle {} event: {}", kind, e),
            }
        }
        log::debug!("Event channel closed, plugin stopped");
    }

    /// Handle one event.
    pub async fn handle_event(&mut self, event: HostEvent) -> Result<EventOutcome> {
        match event {
            HostEvent::DocumentOpened { path } => {
                if let Some(path) = &path {
                    log::debug!("Document opened: '{}'", path.display());
                }
                let outcome = self
                    .orchestrator
                    .handle_document_opened(&self.host, &self.store)
                    .await?;
                Ok(EventOutcome::Restore(outcome))
            }
            HostEvent::CommandInvoked { command } => {
                Ok(EventOutcome::Command(self.execute(command).await))
            }
            HostEvent::DelaySettingChanged {
                delay_after_file_opening,
            } => {
                self.set_delay_after_file_opening(delay_after_file_opening)
                    .await?;
                Ok(EventOutcome::SettingsSaved)
            }
        }
    }

    /// Run a command against the active document.
    pub async fn execute(&self, command: CommandId) -> CommandOutcome {
        match command {
            CommandId::SaveCurrentPosition => {
                commands::save_current_position(&self.host, &self.store).await
            }
            CommandId::RestoreSavedPosition => {
                commands::restore_saved_position(&self.host, &self.store).await
            }
        }
    }

    /// Change the wait after a document opens and save the settings.
    ///
    /// Out-of-range values are rejected and leave the settings untouched.
    pub async fn set_delay_after_file_opening(&mut self, delay: u32) -> Result<()> {
        self.config.set_delay_after_file_opening(delay)?;
        self.orchestrator
            .set_after_open_delay(self.config.after_open_delay());
        self.config
            .save_to(&self.settings_fs, &self.settings_path)
            .await?;
        log::info!("Delay after file opening set to {} ms", delay);
        Ok(())
    }
}

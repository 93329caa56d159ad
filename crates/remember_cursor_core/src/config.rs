//! Configuration types for remember_cursor.
//!
//! There is a single user setting: how long to wait after a document opens
//! before restoring its state. Configuration is persisted as TOML (typically at
//! `~/.config/remember-cursor/config.toml` on Unix systems). Values missing from
//! the stored file fall back to their defaults.
//!
//! # Example
//!
//! ```ignore
//! use remember_cursor_core::config::Config;
//!
//! let mut config = Config::load_from_or_default(&fs, &path).await;
//! config.set_delay_after_file_opening(150)?;
//! config.save_to(&fs, &path).await?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ts_rs::TS;

use crate::error::{CursorError, Result};
use crate::fs::AsyncFileSystem;

/// Default wait after a document opens, in milliseconds.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// Smallest accepted delay.
pub const MIN_DELAY_MS: u32 = 0;

/// Largest accepted delay.
pub const MAX_DELAY_MS: u32 = 300;

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(default)]
pub struct Config {
    /// Milliseconds to wait after a document opens before restoring its state.
    /// Gives the host time to finish loading and to scroll to a linked heading.
    #[serde(rename = "delayAfterFileOpening", alias = "delay_after_file_opening")]
    pub delay_after_file_opening: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_after_file_opening: DEFAULT_DELAY_MS,
        }
    }
}

impl Config {
    /// Create a config with the given delay.
    pub fn with_delay(delay_after_file_opening: u32) -> Result<Self> {
        let mut config = Self::default();
        config.set_delay_after_file_opening(delay_after_file_opening)?;
        Ok(config)
    }

    /// The delay as a [`Duration`].
    pub fn after_open_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_after_file_opening))
    }

    /// Change the delay. Values outside 0..=300 ms are rejected.
    pub fn set_delay_after_file_opening(&mut self, delay: u32) -> Result<()> {
        if !(MIN_DELAY_MS..=MAX_DELAY_MS).contains(&delay) {
            return Err(CursorError::DelayOutOfRange(delay));
        }
        self.delay_after_file_opening = delay;
        Ok(())
    }

    fn validate(self) -> Result<Self> {
        if self.delay_after_file_opening > MAX_DELAY_MS {
            return Err(CursorError::DelayOutOfRange(self.delay_after_file_opening));
        }
        Ok(self)
    }

    // ========================================================================
    // AsyncFileSystem-based methods
    // ========================================================================

    /// Load config from a specific path using an AsyncFileSystem.
    pub async fn load_from<FS: AsyncFileSystem + ?Sized>(fs: &FS, path: &Path) -> Result<Self> {
        let contents = fs
            .read_to_string(path)
            .await
            .map_err(|e| CursorError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()
    }

    /// Save config to a specific path using an AsyncFileSystem.
    pub async fn save_to<FS: AsyncFileSystem + ?Sized>(&self, fs: &FS, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs.create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs.write_file(path, &contents)
            .await
            .map_err(|e| CursorError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(())
    }

    /// Load config from an AsyncFileSystem, returning the default if it is missing or invalid.
    pub async fn load_from_or_default<FS: AsyncFileSystem + ?Sized>(fs: &FS, path: &Path) -> Self {
        if !fs.exists(path).await {
            return Self::default();
        }
        match Self::load_from(fs, path).await {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable config at '{}', using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Get the config file path (~/.config/remember-cursor/config.toml)
    /// Only available on native platforms
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("remember-cursor").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::SyncToAsyncFs;
    use crate::test_utils::MockFileSystem;

    #[test]
    fn test_default_delay() {
        let config = Config::default();
        assert_eq!(config.delay_after_file_opening, 100);
        assert_eq!(config.after_open_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_delay_bounds() {
        let mut config = Config::default();
        config.set_delay_after_file_opening(0).unwrap();
        config.set_delay_after_file_opening(300).unwrap();
        assert!(matches!(
            config.set_delay_after_file_opening(301),
            Err(CursorError::DelayOutOfRange(301))
        ));
        assert_eq!(config.delay_after_file_opening, 300);
    }

    #[test]
    fn test_stored_values_merge_over_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = toml::from_str("delayAfterFileOpening = 40").unwrap();
        assert_eq!(config.delay_after_file_opening, 40);

        let config: Config = toml::from_str("delay_after_file_opening = 60").unwrap();
        assert_eq!(config.delay_after_file_opening, 60);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let fs = SyncToAsyncFs::new(MockFileSystem::new());
        let path = Path::new("config/config.toml");

        Config::with_delay(250).unwrap().save_to(&fs, path).await.unwrap();
        let loaded = Config::load_from(&fs, path).await.unwrap();
        assert_eq!(loaded.delay_after_file_opening, 250);

        let text = fs.inner().get_content("config/config.toml").unwrap();
        assert_eq!(text.trim(), "delayAfterFileOpening = 250");
    }

    #[tokio::test]
    async fn test_load_missing_or_invalid_falls_back() {
        let fs = SyncToAsyncFs::new(
            MockFileSystem::new().with_file("bad.toml", "delay_after_file_opening = 9000"),
        );
        assert_eq!(
            Config::load_from_or_default(&fs, Path::new("missing.toml")).await,
            Config::default()
        );
        assert_eq!(
            Config::load_from_or_default(&fs, Path::new("bad.toml")).await,
            Config::default()
        );
    }
}

//! Events a host delivers to the plugin.
//!
//! Hosts emit these through a [`CallbackRegistry`](super::CallbackRegistry);
//! the plugin handles them one at a time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

use crate::commands::CommandId;

/// Events emitted by the host editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type")]
pub enum HostEvent {
    /// The active document changed (also fired on pane re-render, split, tab switch).
    DocumentOpened {
        /// Path of the opened document, if the host reports one.
        #[serde(default)]
        path: Option<PathBuf>,
    },

    /// The user ran one of the plugin's commands.
    CommandInvoked {
        /// Which command.
        command: CommandId,
    },

    /// The delay slider in the settings surface moved.
    DelaySettingChanged {
        /// New delay in milliseconds.
        delay_after_file_opening: u32,
    },
}

impl HostEvent {
    /// Create a DocumentOpened event.
    pub fn document_opened(path: impl Into<PathBuf>) -> Self {
        Self::DocumentOpened {
            path: Some(path.into()),
        }
    }

    /// Create a CommandInvoked event.
    pub fn command_invoked(command: CommandId) -> Self {
        Self::CommandInvoked { command }
    }

    /// Create a DelaySettingChanged event.
    pub fn delay_setting_changed(delay_after_file_opening: u32) -> Self {
        Self::DelaySettingChanged {
            delay_after_file_opening,
        }
    }

    /// Get the event type as a string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DocumentOpened { .. } => "DocumentOpened",
            Self::CommandInvoked { .. } => "CommandInvoked",
            Self::DelaySettingChanged { .. } => "DelaySettingChanged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_opened_event() {
        let event = HostEvent::document_opened("Notes.md");
        assert_eq!(event.event_type(), "DocumentOpened");
        assert_eq!(
            event,
            HostEvent::DocumentOpened {
                path: Some(PathBuf::from("Notes.md"))
            }
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = HostEvent::command_invoked(CommandId::SaveCurrentPosition);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("CommandInvoked"));
        assert!(json.contains("save-current-position"));

        let parsed: HostEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_document_opened_without_path() {
        let parsed: HostEvent = serde_json::from_str(r#"{"type":"DocumentOpened"}"#).unwrap();
        assert_eq!(parsed, HostEvent::DocumentOpened { path: None });
    }
}

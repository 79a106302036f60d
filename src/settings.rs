use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::SettingsError;

/// What `Activate` does with an id that matches no open tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivatePolicy {
    /// Reject with `TabError::TabNotFound`.
    Strict,
    /// Leave the state unchanged.
    Lenient,
}

impl Default for ActivatePolicy {
    fn default() -> Self {
        Self::Strict
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub activate_policy: ActivatePolicy,
    pub log_level: String, // "error", "warn", "info", "debug", "trace"
    pub emit_updates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            activate_policy: ActivatePolicy::default(),
            log_level: "info".to_string(),
            emit_updates: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Filter directive for `log_level`, or `None` when it names no level.
    pub fn log_directive(&self) -> Option<String> {
        log::LevelFilter::from_str(self.log_level.trim())
            .ok()
            .map(|level| level.to_string().to_lowercase())
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let tmp_path = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;

        Ok(())
    }
}

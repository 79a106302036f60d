// Error types shared by the tab store and settings layer.

use thiserror::Error;

/// Failures a tab command can report. A failed command never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    #[error("tab index {index} out of range for {len} tabs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no open tab with id '{0}'")]
    TabNotFound(String),

    #[error("tab id '{0}' appears more than once")]
    DuplicateTab(String),

    #[error("tab state lock was poisoned")]
    StatePoisoned,
}

pub type Result<T> = std::result::Result<T, TabError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read or write replay stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode update: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Tab(#[from] TabError),
}

// Shared state structs to avoid circular dependencies.
// These are used by main.rs and can be tested independently.

use std::sync::{Arc, Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabError};
use crate::modules::tabs::{TabCommand, TabStore};
use crate::settings::Settings;

/// One ancestor folder in a tab's breadcrumb chain.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PathEntry {
    pub id: String,
    pub label: String,
}

impl PathEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub path: Vec<PathEntry>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), path: Vec::new() }
    }

    pub fn with_path(mut self, path: Vec<PathEntry>) -> Self {
        self.path = path;
        self
    }
}

/// Ordered open tabs plus the id of the active one.
///
/// `active_id` is `None` exactly when `tabs` is empty; otherwise it names a
/// tab in `tabs`. Only the transitions in `modules::tabs` build one, so
/// callers can read a state but never hand `apply` a dangling active id.
#[derive(Clone, Serialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabListState {
    pub(crate) tabs: Vec<Tab>,
    #[serde(rename = "activeTabId")]
    pub(crate) active_id: Option<String>,
}

impl TabListState {
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Store handle shared across threads. Every command takes the tab lock once,
/// so each read-modify-write is atomic.
#[derive(Clone)]
pub struct AppState {
    pub tabs: Arc<Mutex<TabStore>>,
    pub settings: Arc<RwLock<Settings>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let store = TabStore::new().with_settings(&settings);
        Self {
            tabs: Arc::new(Mutex::new(store)),
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn dispatch(&self, command: TabCommand) -> Result<TabListState> {
        let mut store = self.tabs.lock().map_err(|_| TabError::StatePoisoned)?;
        store.dispatch(command)?;
        Ok(store.state().clone())
    }

    pub fn snapshot(&self) -> Result<TabListState> {
        let store = self.tabs.lock().map_err(|_| TabError::StatePoisoned)?;
        Ok(store.state().clone())
    }

    /// Replaces the settings and pushes the store-relevant parts into the store.
    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        {
            let mut store = self.tabs.lock().map_err(|_| TabError::StatePoisoned)?;
            store.apply_settings(&settings);
        }
        let mut current = self.settings.write().map_err(|_| TabError::StatePoisoned)?;
        *current = settings;
        Ok(())
    }
}

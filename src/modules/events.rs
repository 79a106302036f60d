// Update notifications pushed to rendering collaborators after each state change.

use serde::Serialize;

use crate::state::{Tab, TabListState};

/// Payload of an "update-tabs" notification.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabsUpdate {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<String>,
    pub emitted_at: String, // RFC 3339
}

impl TabsUpdate {
    pub fn from_state(state: &TabListState) -> Self {
        Self {
            tabs: state.tabs.clone(),
            active_tab_id: state.active_id.clone(),
            emitted_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub type TabListener = Box<dyn Fn(&TabsUpdate) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

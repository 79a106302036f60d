// Drag-reorder support - pure logic, no gesture handling.
// Turns a finished drag over the tab strip into a Move command.

use crate::modules::tabs::TabCommand;
use crate::state::{Tab, TabListState};

/// Tracks the tab currently being dragged so the overlay can draw it.
#[derive(Debug, Default, Clone)]
pub struct DragSession {
    dragged: Option<Tab>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up the tab at `index` (its visual position in the strip).
    pub fn start(&mut self, state: &TabListState, index: usize) -> Option<&Tab> {
        self.dragged = state.tabs.get(index).cloned();
        if self.dragged.is_none() {
            log::warn!("[Drag] No tab at index {} ({} open)", index, state.len());
        }
        self.dragged.as_ref()
    }

    pub fn dragged(&self) -> Option<&Tab> {
        self.dragged.as_ref()
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// Resolves the drop of the dragged tab onto `over_id`. Dropping nowhere,
    /// or onto the dragged tab itself, produces no command. The session is
    /// cleared either way.
    pub fn finish(&mut self, state: &TabListState, over_id: Option<&str>) -> Option<TabCommand> {
        let dragged = self.dragged.take()?;
        let over_id = over_id?;
        if dragged.id == over_id {
            return None;
        }

        let from = state.position(&dragged.id)?;
        let to = state.position(over_id)?;
        log::debug!("[Drag] {} -> {} (index {} -> {})", dragged.id, over_id, from, to);
        Some(TabCommand::Move { from, to })
    }
}

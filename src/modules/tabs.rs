// Tab list state machine - pure transitions + the store that owns them.
// Follows strict modular monolith pattern: no rendering or I/O in here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, TabError};
use crate::modules::events::{SubscriptionId, TabListener, TabsUpdate};
use crate::settings::{ActivatePolicy, Settings};
use crate::state::{Tab, TabListState};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TabCommand {
    Open { tab: Tab },
    Move { from: usize, to: usize },
    Close { id: String },
    Activate { id: String },
}

impl TabCommand {
    pub fn open(tab: Tab) -> Self {
        Self::Open { tab }
    }

    pub fn close(id: impl Into<String>) -> Self {
        Self::Close { id: id.into() }
    }

    pub fn activate(id: impl Into<String>) -> Self {
        Self::Activate { id: id.into() }
    }
}

/// Pure transition: computes the next state without touching `state`.
/// On error the caller keeps its current state.
pub fn apply(state: &TabListState, command: TabCommand, policy: ActivatePolicy) -> Result<TabListState> {
    match command {
        TabCommand::Open { tab } => Ok(open_logic(state, tab)),
        TabCommand::Move { from, to } => move_logic(state, from, to),
        TabCommand::Close { id } => Ok(close_logic(state, &id)),
        TabCommand::Activate { id } => activate_logic(state, &id, policy),
    }
}

/// An id already present keeps its slot and label but takes the incoming path.
fn open_logic(state: &TabListState, tab: Tab) -> TabListState {
    let mut tabs = state.tabs.clone();
    let active_id = tab.id.clone();

    match tabs.iter_mut().find(|t| t.id == tab.id) {
        Some(existing) => existing.path = tab.path,
        None => tabs.push(tab),
    }

    TabListState { tabs, active_id: Some(active_id) }
}

/// Array-move: remove at `from`, reinsert at `to`.
fn move_logic(state: &TabListState, from: usize, to: usize) -> Result<TabListState> {
    let len = state.tabs.len();
    for index in [from, to] {
        if index >= len {
            return Err(TabError::IndexOutOfRange { index, len });
        }
    }

    let mut tabs = state.tabs.clone();
    let tab = tabs.remove(from);
    tabs.insert(to, tab);

    Ok(TabListState { tabs, active_id: state.active_id.clone() })
}

/// Closing the active tab hands focus to its left neighbour, or to the new
/// first tab when the closed one was first.
fn close_logic(state: &TabListState, id: &str) -> TabListState {
    let Some(index) = state.position(id) else {
        return state.clone();
    };

    let mut tabs = state.tabs.clone();
    tabs.remove(index);

    let active_id = if state.active_id.as_deref() == Some(id) {
        if index == 0 {
            tabs.first().map(|t| t.id.clone())
        } else {
            Some(state.tabs[index - 1].id.clone())
        }
    } else {
        state.active_id.clone()
    };

    TabListState { tabs, active_id }
}

fn activate_logic(state: &TabListState, id: &str, policy: ActivatePolicy) -> Result<TabListState> {
    if state.position(id).is_some() {
        return Ok(TabListState { tabs: state.tabs.clone(), active_id: Some(id.to_string()) });
    }
    match policy {
        ActivatePolicy::Strict => Err(TabError::TabNotFound(id.to_string())),
        ActivatePolicy::Lenient => Ok(state.clone()),
    }
}

/// Owns the current tab list and notifies listeners after each change.
pub struct TabStore {
    state: TabListState,
    policy: ActivatePolicy,
    emit_updates: bool,
    listeners: Vec<(SubscriptionId, TabListener)>,
    next_subscription: u64,
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStore {
    pub fn new() -> Self {
        Self {
            state: TabListState::default(),
            policy: ActivatePolicy::default(),
            emit_updates: true,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Seeds the store with tabs already open when the editor view mounts.
    /// Without an explicit `active_id` the first tab becomes active.
    pub fn with_initial(tabs: Vec<Tab>, active_id: Option<&str>) -> Result<Self> {
        let mut seen = HashSet::new();
        for tab in &tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(TabError::DuplicateTab(tab.id.clone()));
            }
        }

        let active_id = match active_id {
            Some(id) if seen.contains(id) => Some(id.to_string()),
            Some(id) => return Err(TabError::TabNotFound(id.to_string())),
            None => tabs.first().map(|t| t.id.clone()),
        };

        let mut store = Self::new();
        store.state = TabListState { tabs, active_id };
        Ok(store)
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.apply_settings(settings);
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.policy = settings.activate_policy;
        self.emit_updates = settings.emit_updates;
    }

    pub fn state(&self) -> &TabListState {
        &self.state
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.state.tabs
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.state.active_tab()
    }

    pub fn open(&mut self, tab: Tab) -> &TabListState {
        // Open never fails.
        let next = open_logic(&self.state, tab);
        self.commit(next);
        &self.state
    }

    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<&TabListState> {
        self.dispatch(TabCommand::Move { from, to })
    }

    pub fn close(&mut self, id: &str) -> &TabListState {
        let next = close_logic(&self.state, id);
        self.commit(next);
        &self.state
    }

    pub fn activate(&mut self, id: &str) -> Result<&TabListState> {
        self.dispatch(TabCommand::activate(id))
    }

    pub fn dispatch(&mut self, command: TabCommand) -> Result<&TabListState> {
        log::debug!("[Tabs] Applying {:?}", command);
        match apply(&self.state, command, self.policy) {
            Ok(next) => {
                self.commit(next);
                Ok(&self.state)
            }
            Err(e) => {
                log::debug!("[Tabs] Rejected command: {}", e);
                Err(e)
            }
        }
    }

    pub fn subscribe(&mut self, listener: TabListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: TabListState) {
        if next == self.state {
            log::debug!("[Tabs] No change detected, skipping emit");
            return;
        }
        self.state = next;
        log::debug!(
            "[Tabs] Order: {:?}, active: {:?}",
            self.state.ids(),
            self.state.active_id
        );

        if self.emit_updates && !self.listeners.is_empty() {
            let update = TabsUpdate::from_state(&self.state);
            for (_, listener) in &self.listeners {
                listener(&update);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PathEntry;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn store_with(ids: &[&str], active: &str) -> TabStore {
        let tabs = ids.iter().map(|id| Tab::new(*id, format!("{}.js", id))).collect();
        TabStore::with_initial(tabs, Some(active)).unwrap()
    }

    fn ids(store: &TabStore) -> Vec<&str> {
        store.state().ids()
    }

    #[test]
    fn test_open_appends_and_activates() {
        let mut store = TabStore::new();
        store.open(Tab::new("f1", "f1.js"));
        store.open(Tab::new("f2", "f2.js"));

        assert_eq!(ids(&store), vec!["f1", "f2"]);
        assert_eq!(store.active_tab().unwrap().id, "f2");
    }

    #[test]
    fn test_open_existing_updates_path_in_place() {
        let mut store = store_with(&["a", "b", "c"], "c");
        let path = vec![PathEntry::new("src", "src")];
        store.open(Tab::new("a", "renamed.js").with_path(path.clone()));

        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        let active = store.active_tab().unwrap();
        assert_eq!(active.id, "a");
        assert_eq!(active.label, "a.js");
        assert_eq!(active.path, path);
        assert_eq!(store.tabs()[0].path, path);
    }

    #[rstest]
    #[case(0, 2, vec!["A", "B", "C", "D"], vec!["B", "C", "A", "D"])]
    #[case(3, 0, vec!["A", "B", "C", "D"], vec!["D", "A", "B", "C"])]
    #[case(1, 1, vec!["A", "B", "C", "D"], vec!["A", "B", "C", "D"])]
    #[case(0, 3, vec!["A", "B", "C", "D"], vec!["B", "C", "D", "A"])]
    fn test_move_is_array_move(
        #[case] from: usize,
        #[case] to: usize,
        #[case] before: Vec<&str>,
        #[case] after: Vec<&str>,
    ) {
        let mut store = store_with(&before, "B");
        store.move_tab(from, to).unwrap();
        assert_eq!(ids(&store), after);
        assert_eq!(store.active_tab().unwrap().id, "B");
    }

    #[rstest]
    #[case(4, 0, 4)]
    #[case(0, 4, 4)]
    #[case(9, 9, 9)]
    fn test_move_out_of_range_leaves_state(#[case] from: usize, #[case] to: usize, #[case] bad: usize) {
        let mut store = store_with(&["A", "B", "C", "D"], "A");
        let before = store.state().clone();

        let err = store.move_tab(from, to).unwrap_err();
        assert_eq!(err, TabError::IndexOutOfRange { index: bad, len: 4 });
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_move_on_empty_store_fails() {
        let mut store = TabStore::new();
        assert!(matches!(store.move_tab(0, 0), Err(TabError::IndexOutOfRange { len: 0, .. })));
    }

    #[rstest]
    #[case::first_active(&["A", "B", "C"], "A", "A", vec!["B", "C"], Some("B"))]
    #[case::middle_active(&["A", "B", "C"], "B", "B", vec!["A", "C"], Some("A"))]
    #[case::last_active(&["A", "B", "C"], "C", "C", vec!["A", "B"], Some("B"))]
    #[case::not_active(&["A", "B", "C"], "C", "A", vec!["B", "C"], Some("C"))]
    #[case::only_tab(&["A"], "A", "A", vec![], None)]
    fn test_close_selects_neighbour(
        #[case] tabs: &[&str],
        #[case] active: &str,
        #[case] close: &str,
        #[case] after: Vec<&str>,
        #[case] new_active: Option<&str>,
    ) {
        let mut store = store_with(tabs, active);
        store.close(close);
        assert_eq!(ids(&store), after);
        assert_eq!(store.active_tab().map(|t| t.id.as_str()), new_active);
        assert_eq!(store.state().active_id.as_deref(), new_active);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut store = store_with(&["A", "B"], "B");
        let before = store.state().clone();
        store.close("nonexistent");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_activate_strict_and_lenient() {
        let mut store = store_with(&["A", "B"], "A");
        store.activate("B").unwrap();
        assert_eq!(store.active_tab().unwrap().id, "B");

        assert_eq!(store.activate("missing").unwrap_err(), TabError::TabNotFound("missing".into()));
        assert_eq!(store.active_tab().unwrap().id, "B");

        let lenient = Settings { activate_policy: ActivatePolicy::Lenient, ..Settings::default() };
        store.apply_settings(&lenient);
        store.activate("missing").unwrap();
        assert_eq!(store.active_tab().unwrap().id, "B");
    }

    #[test]
    fn test_with_initial_validation() {
        let dup = vec![Tab::new("a", "a"), Tab::new("a", "a")];
        assert_eq!(TabStore::with_initial(dup, None).err(), Some(TabError::DuplicateTab("a".into())));

        let tabs = vec![Tab::new("a", "a")];
        assert_eq!(
            TabStore::with_initial(tabs.clone(), Some("x")).err(),
            Some(TabError::TabNotFound("x".into()))
        );

        let store = TabStore::with_initial(tabs, None).unwrap();
        assert_eq!(store.active_tab().unwrap().id, "a");

        let empty = TabStore::with_initial(Vec::new(), None).unwrap();
        assert!(empty.active_tab().is_none());
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let state = store_with(&["A", "B"], "A").state().clone();
        let next = apply(&state, TabCommand::close("A"), ActivatePolicy::Strict).unwrap();
        assert_eq!(state.ids(), vec!["A", "B"]);
        assert_eq!(next.ids(), vec!["B"]);
    }

    #[test]
    fn test_listeners_fire_only_on_change() {
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let mut store = TabStore::new();
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(Box::new(move |u: &TabsUpdate| {
            sink.lock().unwrap().push(u.active_tab_id.clone());
        }));

        store.open(Tab::new("a", "a.rs"));
        store.open(Tab::new("a", "a.rs"));
        store.close("ghost");
        let _ = store.move_tab(0, 5);
        store.open(Tab::new("b", "b.rs"));
        assert_eq!(*seen.lock().unwrap(), vec![Some("a".to_string()), Some("b".to_string())]);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.close("b");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_emit_updates_disabled() {
        let count = Arc::new(Mutex::new(0));
        let settings = Settings { emit_updates: false, ..Settings::default() };
        let mut store = TabStore::new().with_settings(&settings);
        let sink = Arc::clone(&count);
        store.subscribe(Box::new(move |_: &TabsUpdate| *sink.lock().unwrap() += 1));

        store.open(Tab::new("a", "a.rs"));
        assert_eq!(*count.lock().unwrap(), 0);
        assert_eq!(store.tabs().len(), 1);
    }

    #[test]
    fn test_command_json_shape() {
        let cmd: TabCommand = serde_json::from_str(r#"{"type":"move","from":0,"to":1}"#).unwrap();
        assert_eq!(cmd, TabCommand::Move { from: 0, to: 1 });

        let cmd: TabCommand =
            serde_json::from_str(r#"{"type":"open","tab":{"id":"f1","label":"f1.js"}}"#).unwrap();
        assert_eq!(cmd, TabCommand::open(Tab::new("f1", "f1.js")));
    }
}

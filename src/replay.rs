// Replays a script of tab commands (JSON lines) against an AppState and
// writes every resulting "update-tabs" payload to `out`, one JSON per line.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use crate::error::{ReplayError, TabError};
use crate::modules::events::TabsUpdate;
use crate::modules::tabs::TabCommand;
use crate::state::AppState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub applied: usize,
    pub rejected: usize,
}

/// Malformed or rejected lines are counted and logged once; processing
/// continues with the next line. Only stream and lock failures abort.
pub fn replay<R: BufRead, W: Write>(app: &AppState, reader: R, mut out: W) -> Result<ReplayStats, ReplayError> {
    let pending: Arc<Mutex<Vec<TabsUpdate>>> = Arc::new(Mutex::new(Vec::new()));
    let subscription = {
        let sink = Arc::clone(&pending);
        let mut store = app.tabs.lock().map_err(|_| TabError::StatePoisoned)?;
        store.subscribe(Box::new(move |update: &TabsUpdate| {
            if let Ok(mut queue) = sink.lock() {
                queue.push(update.clone());
            }
        }))
    };

    let result = replay_lines(app, reader, &mut out, &pending);

    if let Ok(mut store) = app.tabs.lock() {
        store.unsubscribe(subscription);
    }
    result
}

fn replay_lines<R: BufRead, W: Write>(
    app: &AppState,
    reader: R,
    out: &mut W,
    pending: &Mutex<Vec<TabsUpdate>>,
) -> Result<ReplayStats, ReplayError> {
    let mut stats = ReplayStats::default();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command: TabCommand = match serde_json::from_str(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                log::warn!("[Replay] line {}: invalid command: {}", n + 1, e);
                stats.rejected += 1;
                continue;
            }
        };

        match app.dispatch(command) {
            Ok(_) => stats.applied += 1,
            Err(TabError::StatePoisoned) => return Err(TabError::StatePoisoned.into()),
            Err(e) => {
                log::warn!("[Replay] line {}: {}", n + 1, e);
                stats.rejected += 1;
            }
        }

        let updates: Vec<TabsUpdate> = {
            let mut queue = pending.lock().map_err(|_| TabError::StatePoisoned)?;
            queue.drain(..).collect()
        };
        for update in &updates {
            serde_json::to_writer(&mut *out, update)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::io::Cursor;

    const SCRIPT: &str = r#"{"type":"open","tab":{"id":"f1","label":"f1.js"}}
{"type":"open","tab":{"id":"f2","label":"f2.js"}}
garbage

{"type":"move","from":0,"to":1}
{"type":"move","from":0,"to":5}
{"type":"close","id":"f2"}
{"type":"activate","id":"nope"}
{"type":"close","id":"ghost"}
"#;

    fn lines(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_replay_emits_one_line_per_change() {
        let app = AppState::new(Settings::default());
        let mut out = Vec::new();

        let stats = replay(&app, Cursor::new(SCRIPT), &mut out).unwrap();
        assert_eq!(stats, ReplayStats { applied: 5, rejected: 3 });

        let updates = lines(&out);
        let active: Vec<&str> = updates.iter().map(|u| u["activeTabId"].as_str().unwrap()).collect();
        assert_eq!(active, vec!["f1", "f2", "f2", "f1"]);

        let order: Vec<&str> = updates[2]["tabs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["f2", "f1"]);

        let state = app.snapshot().unwrap();
        assert_eq!(state.ids(), vec!["f1"]);
    }

    #[test]
    fn test_replay_can_run_twice() {
        let app = AppState::new(Settings::default());
        let mut out = Vec::new();
        replay(&app, Cursor::new(SCRIPT), &mut out).unwrap();

        let mut second = Vec::new();
        let stats = replay(&app, Cursor::new(r#"{"type":"close","id":"f1"}"#), &mut second).unwrap();
        assert_eq!(stats, ReplayStats { applied: 1, rejected: 0 });
        assert_eq!(lines(&second).len(), 1);
    }

    #[test]
    fn test_replay_respects_emit_toggle() {
        let settings = Settings { emit_updates: false, ..Settings::default() };
        let app = AppState::new(settings);
        let mut out = Vec::new();

        let stats = replay(&app, Cursor::new(SCRIPT), &mut out).unwrap();
        assert_eq!(stats.applied, 5);
        assert!(out.is_empty());
    }
}

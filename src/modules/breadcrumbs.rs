// Breadcrumb and content-path derivation for the active tab.

use crate::state::{PathEntry, Tab};

/// Ancestors followed by the tab itself.
pub fn breadcrumb_chain(tab: &Tab) -> Vec<PathEntry> {
    let mut chain = tab.path.clone();
    chain.push(PathEntry::new(tab.id.clone(), tab.label.clone()));
    chain
}

/// Project-relative path the content loader fetches for `tab`.
pub fn content_path(tab: &Tab) -> String {
    if tab.path.is_empty() {
        return tab.label.clone();
    }
    let dirs: Vec<&str> = tab.path.iter().map(|p| p.id.as_str()).collect();
    format!("{}/{}", dirs.join("/"), tab.label)
}

/// Ids to expand in the file tree when crumb `index` is clicked.
///
/// Everything up to and including the clicked crumb, except that the last
/// crumb (the file itself) is never expanded.
pub fn expand_targets(chain: &[PathEntry], index: usize) -> Vec<String> {
    if index >= chain.len() {
        return Vec::new();
    }
    let end = if index == chain.len() - 1 { index } else { index + 1 };
    chain[..end].iter().map(|p| p.id.clone()).collect()
}

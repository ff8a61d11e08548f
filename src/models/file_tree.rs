//! Display tree derived from the flat file store.
//!
//! The tree is disposable: it is rebuilt from the store on every refresh and
//! holds no back-references. Folder expansion lives in [`ExpansionState`],
//! which survives rebuilds and is persisted on its own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::file_store::{FileStore, PathChange};
use super::path_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    pub children: BTreeMap<String, TreeNode>,
    pub is_expanded: bool,
}

impl TreeNode {
    fn root() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            is_directory: true,
            children: BTreeMap::new(),
            is_expanded: true,
        }
    }

    fn leaf(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            is_directory: false,
            children: BTreeMap::new(),
            is_expanded: false,
        }
    }

    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let mut current = self;
        for seg in path_key::segments(path) {
            current = current.children.get(seg)?;
        }
        Some(current)
    }

    /// Children in display order: folders first, then by name.
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut children: Vec<&TreeNode> = self.children.values().collect();
        children.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.cmp(&b.name))
        });
        children
    }
}

/// Per-folder expand/collapse flags keyed by path. Unknown folders are
/// collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    folders: FxHashMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        path.is_empty() || self.folders.get(path).copied().unwrap_or(false)
    }

    pub fn set(&mut self, path: &str, expanded: bool) -> bool {
        self.folders.insert(path.to_string(), expanded) != Some(expanded)
    }

    pub fn toggle(&mut self, path: &str) -> bool {
        let next = !self.is_expanded(path);
        self.folders.insert(path.to_string(), next);
        next
    }

    /// Carries flags along with a renamed or moved subtree.
    pub fn rebase(&mut self, change: &PathChange) -> bool {
        let affected: Vec<(String, String)> = self
            .folders
            .keys()
            .filter_map(|key| change.resolve(key).map(|to| (key.clone(), to)))
            .collect();
        for (from, to) in &affected {
            if let Some(flag) = self.folders.remove(from) {
                self.folders.insert(to.clone(), flag);
            }
        }
        !affected.is_empty()
    }

    /// Drops flags for every removed path and any folder beneath one,
    /// including implicit folders that had no record of their own.
    pub fn forget(&mut self, removed: &[String]) -> bool {
        let before = self.folders.len();
        self.folders.retain(|key, _| {
            !removed
                .iter()
                .any(|path| key == path || path_key::is_ancestor(path, key))
        });
        self.folders.len() != before
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Builds the display tree. A node is a folder when any key passes through it
/// or when its own record says so; a file record never demotes a node that
/// already acts as a folder.
pub fn build_tree(store: &FileStore, expansion: &ExpansionState) -> TreeNode {
    let mut root = TreeNode::root();

    for record in store.iter() {
        let segments: Vec<&str> = path_key::segments(&record.path).collect();
        let Some((last, intermediates)) = segments.split_last() else {
            continue;
        };

        let mut node = &mut root;
        let mut path = String::new();
        for seg in intermediates {
            path = path_key::child(&path, seg);
            node = node
                .children
                .entry((*seg).to_string())
                .or_insert_with(|| TreeNode::leaf(seg, path.clone()));
            node.is_directory = true;
        }

        path = path_key::child(&path, last);
        let leaf = node
            .children
            .entry((*last).to_string())
            .or_insert_with(|| TreeNode::leaf(last, path.clone()));
        leaf.is_directory |= record.is_directory;
    }

    apply_expansion(&mut root, expansion);
    root
}

fn apply_expansion(node: &mut TreeNode, expansion: &ExpansionState) {
    node.is_expanded = node.is_directory && expansion.is_expanded(&node.path);
    for child in node.children.values_mut() {
        apply_expansion(child, expansion);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub depth: u16,
    pub is_dir: bool,
    pub is_expanded: bool,
}

impl TreeNode {
    /// Visible rows below this node, depth-first, skipping collapsed folders.
    pub fn flatten_for_view(&self) -> Vec<TreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(&TreeNode, u16)> = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            if !std::ptr::eq(node, self) {
                result.push(TreeRow {
                    path: node.path.clone(),
                    name: node.name.clone(),
                    depth,
                    is_dir: node.is_directory,
                    is_expanded: node.is_expanded,
                });
            }

            if node.is_expanded {
                for child in node.sorted_children().into_iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;

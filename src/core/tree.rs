//! `git ls-tree` parsing and hierarchical tree construction.
//!
//! This module turns the flat output of `git ls-tree -r` into a directory/
//! file tree suitable for interactive expand/collapse browsing.
//!
//! # Public API
//! - [`LsTreeEntry`] / [`parse_ls_tree`]: Per-line plumbing output parser
//! - [`TreeNode`]: Tagged branch/leaf tree with stable child ordering
//! - [`build_tree`]: Flat entries to tree, synthesizing missing directories
//! - [`with_collapsed`] / [`toggle_collapsed`]: Collapse-state updates
//! - [`visible_rows`]: Pre-order flattening for buffer rendering
//!
//! # Ordering Invariant
//! Within any branch's children, branch-type children come before leaf-type
//! children, and each group is sorted lexicographically ascending by label.
//! The tree is rebuilt from scratch on every read; expand/collapse only ever
//! changes the `collapsed` flag of one node.

use crate::core::error::{GinBuffersError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Object kind of one `ls-tree` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Blob,
    Tree,
}

/// One parsed line of `git ls-tree -r` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsTreeEntry {
    pub mode: String,
    pub kind: ObjectKind,
    pub hash: String,
    pub path: String,
}

static LS_TREE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(blob|tree)\s+([0-9a-f]+)\s+(.+)$").expect("ls-tree pattern is valid")
});

/// Parse raw `ls-tree` output text; non-matching lines (e.g. a trailing
/// blank line) are silently dropped.
pub fn parse_ls_tree(text: &str) -> Vec<LsTreeEntry> {
    text.lines()
        .filter_map(|line| {
            LS_TREE_PATTERN.captures(line).map(|caps| LsTreeEntry {
                mode: caps[1].to_string(),
                kind: if &caps[2] == "tree" {
                    ObjectKind::Tree
                } else {
                    ObjectKind::Blob
                },
                hash: caps[3].to_string(),
                path: caps[4].to_string(),
            })
        })
        .collect()
}

/// A node in the browsable repository tree.
///
/// `value` is the repository-relative path; the root carries `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Branch {
        label: String,
        value: String,
        children: Vec<TreeNode>,
        collapsed: bool,
    },
    Leaf {
        label: String,
        value: String,
    },
}

impl TreeNode {
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Branch { label, .. } | TreeNode::Leaf { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TreeNode::Branch { value, .. } | TreeNode::Leaf { value, .. } => value,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, TreeNode::Branch { .. })
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

/// Insert `path` and every ancestor directory of it into `dirs`.
fn insert_dir_chain(path: &str, dirs: &mut BTreeSet<String>) {
    if path.is_empty() {
        return;
    }
    for (i, b) in path.bytes().enumerate() {
        if b == b'/' {
            dirs.insert(path[..i].to_string());
        }
    }
    dirs.insert(path.to_string());
}

fn label_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, label)| label).unwrap_or(path)
}

/// Build the browsable tree from flat `ls-tree` entries.
///
/// Handles recursive `ls-tree -r` output where intermediate directories have
/// no explicit `tree` entry (they are synthesized, collapsed) and entries
/// arrive in arbitrary order. Every branch starts collapsed except the root.
pub fn build_tree(entries: &[LsTreeEntry], root_label: &str) -> TreeNode {
    // Path set of every directory, explicit or synthesized. A BTreeSet keeps
    // sibling discovery deterministic regardless of input order.
    let mut dirs: BTreeSet<String> = BTreeSet::new();
    let mut files: Vec<&str> = Vec::new();

    for entry in entries {
        match entry.kind {
            ObjectKind::Tree => insert_dir_chain(&entry.path, &mut dirs),
            ObjectKind::Blob => {
                insert_dir_chain(parent_of(&entry.path), &mut dirs);
                files.push(entry.path.as_str());
            }
        }
    }

    let mut child_dirs: HashMap<&str, Vec<&str>> = HashMap::new();
    for dir in &dirs {
        child_dirs.entry(parent_of(dir)).or_default().push(dir.as_str());
    }
    let mut child_files: HashMap<&str, Vec<&str>> = HashMap::new();
    for file in files {
        child_files.entry(parent_of(file)).or_default().push(file);
    }

    assemble(
        root_label,
        "",
        false,
        &child_dirs,
        &child_files,
    )
}

fn assemble(
    label: &str,
    path: &str,
    collapsed: bool,
    child_dirs: &HashMap<&str, Vec<&str>>,
    child_files: &HashMap<&str, Vec<&str>>,
) -> TreeNode {
    let mut branches: Vec<TreeNode> = child_dirs
        .get(path)
        .map(|dirs| {
            dirs.iter()
                .map(|dir| assemble(label_of(dir), dir, true, child_dirs, child_files))
                .collect()
        })
        .unwrap_or_default();
    branches.sort_by(|a, b| a.label().cmp(b.label()));

    let mut leaves: Vec<TreeNode> = child_files
        .get(path)
        .map(|files| {
            files
                .iter()
                .map(|file| TreeNode::Leaf {
                    label: label_of(file).to_string(),
                    value: file.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    leaves.sort_by(|a, b| a.label().cmp(b.label()));

    let mut children = branches;
    children.append(&mut leaves);

    TreeNode::Branch {
        label: label.to_string(),
        value: path.to_string(),
        children,
        collapsed,
    }
}

/// Return a copy of the tree with the branch at `path` given the requested
/// collapse state. No other field changes.
pub fn with_collapsed(root: &TreeNode, path: &str, collapsed: bool) -> Result<TreeNode> {
    let mut tree = root.clone();
    let node = locate_mut(&mut tree, path)
        .ok_or_else(|| GinBuffersError::tree_path_not_found(path))?;
    match node {
        TreeNode::Branch {
            collapsed: state, ..
        } => {
            *state = collapsed;
            Ok(tree)
        }
        TreeNode::Leaf { .. } => Err(GinBuffersError::tree_path_not_found(path)),
    }
}

/// Return a copy of the tree with the branch at `path` toggled.
pub fn toggle_collapsed(root: &TreeNode, path: &str) -> Result<TreeNode> {
    let current = match locate(root, path) {
        Some(TreeNode::Branch { collapsed, .. }) => *collapsed,
        _ => return Err(GinBuffersError::tree_path_not_found(path)),
    };
    with_collapsed(root, path, !current)
}

fn locate<'a>(node: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
    if node.value() == path {
        return Some(node);
    }
    if let TreeNode::Branch { children, .. } = node {
        for child in children {
            let value = child.value();
            if path == value || path.starts_with(&format!("{value}/")) {
                return locate(child, path);
            }
        }
    }
    None
}

fn locate_mut<'a>(node: &'a mut TreeNode, path: &str) -> Option<&'a mut TreeNode> {
    if node.value() == path {
        return Some(node);
    }
    if let TreeNode::Branch { children, .. } = node {
        for child in children {
            let value = child.value().to_string();
            if path == value || path.starts_with(&format!("{value}/")) {
                return locate_mut(child, path);
            }
        }
    }
    None
}

/// One visible row of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub depth: usize,
    pub node: &'a TreeNode,
}

/// Flatten the tree for rendering: pre-order traversal that does not
/// descend into collapsed branches. The root itself is never a row.
pub fn visible_rows(root: &TreeNode) -> Vec<TreeRow<'_>> {
    let mut rows = Vec::new();
    if let TreeNode::Branch { children, .. } = root {
        for child in children {
            push_rows(child, 0, &mut rows);
        }
    }
    rows
}

fn push_rows<'a>(node: &'a TreeNode, depth: usize, rows: &mut Vec<TreeRow<'a>>) {
    rows.push(TreeRow { depth, node });
    if let TreeNode::Branch {
        children,
        collapsed: false,
        ..
    } = node
    {
        for child in children {
            push_rows(child, depth + 1, rows);
        }
    }
}

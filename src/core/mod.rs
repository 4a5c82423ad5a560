//! Core functionality for the gin-buffers engine.
//!
//! This module provides the porcelain output parsers, the tree builder, the
//! decoration extractor, the action registry, and the git subprocess layer.

pub mod ansi;
pub mod branch_parser;
pub mod diff_parser;
pub mod error;
pub mod git;
pub mod git_args;
pub mod log_parser;
pub mod output;
pub mod registry;
pub mod status_parser;
pub mod tree;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GinBuffersError, Result};

// === Git subprocess layer ===
// Worktree-scoped runner and argument vector construction
pub use git::GitRunner;
pub use git_args::{GitArgs, BRANCH_FLAGS, DIFF_FLAGS, LOG_FLAGS, STATUS_FLAGS};

// === Line parsers ===
// Structured records from porcelain/plumbing text output
pub use branch_parser::{parse_branches, Branch};
pub use diff_parser::{parse_file_sections, FileSection};
pub use log_parser::{parse_log, parse_reflog, LogEntry};
pub use status_parser::{parse_status, StatusBuffer, StatusEntry, StatusHeader};

// === Tree building ===
// Hierarchical browsing over flat ls-tree entries
pub use tree::{
    build_tree, parse_ls_tree, toggle_collapsed, visible_rows, with_collapsed, LsTreeEntry,
    ObjectKind, TreeNode, TreeRow,
};

// === Decoration extraction ===
// ANSI stripping with offset-corrected highlight annotations
pub use ansi::{apply_annotations, strip_decorations, Annotation};

// === Action registry ===
// Per-buffer candidate gatherers for range-to-object resolution
pub use registry::{ActionRegistry, BufferId, Candidate, LineRange};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header};

//! Gin Buffers - the engine behind interactive git buffers in an editor.
//!
//! This library turns `git` porcelain output into structured records (log,
//! reflog, branch, status, ls-tree, unified diff), builds browsable file
//! trees, extracts ANSI decorations for re-application as highlights, and
//! runs a loopback TCP proxy so credential and editor prompts from spawned
//! `git` subprocesses can be answered by the host application.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module; the
//! prompt proxy lives in [`proxy`].

pub mod commands;
pub mod core;
pub mod proxy;

// Re-export the core public API for external users
pub use core::{
    apply_annotations,
    parse_branches,
    parse_file_sections,
    parse_log,
    parse_ls_tree,
    parse_reflog,
    parse_status,
    // Decoration extraction
    strip_decorations,

    build_tree,
    toggle_collapsed,
    visible_rows,
    with_collapsed,

    print_error,
    print_info,
    print_section_header,

    // Action registry
    ActionRegistry,
    Annotation,
    Branch,
    BufferId,
    Candidate,
    FileSection,
    // Error handling
    GinBuffersError,
    // Git subprocess layer
    GitArgs,
    GitRunner,
    LineRange,
    LogEntry,
    LsTreeEntry,
    ObjectKind,
    Result,
    StatusBuffer,
    StatusEntry,
    StatusHeader,
    // Tree building
    TreeNode,
    TreeRow,
};

pub use proxy::{EditOutcome, EditSignal, PromptHost, ProxyConfig, ProxyServer};

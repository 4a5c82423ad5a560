//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GinBuffersError`] which provides comprehensive error
//! handling for all gin-buffers operations. It uses `thiserror` for ergonomic
//! error definitions and includes specialized error constructors for common
//! failure scenarios.
//!
//! # Public API
//! - [`GinBuffersError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GinBuffersError>`
//!
//! # Error Categories
//! - **Parse failures**: Branch lines that match no known pattern (fatal for
//!   the whole call; the lenient parsers skip instead of raising)
//! - **Subprocess failures**: Rejected flags, non-zero git exits, spawn errors
//! - **Proxy failures**: Malformed frames, unknown request kinds, host errors
//! - **Registry failures**: Candidate gathering without a registered gatherer

use thiserror::Error;

/// Domain-specific error types for gin-buffers
#[derive(Error, Debug)]
pub enum GinBuffersError {
    // Git repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error("Flag '{flag}' is not recognized by the {command} command")]
    FlagNotAllowed { flag: String, command: String },

    // Parse errors
    #[error("Unrecognized branch line: {line}")]
    BranchParse { line: String },

    #[error("Status output is missing its '## ...' header line")]
    StatusHeaderMissing,

    #[error("No node at tree path '{path}'")]
    TreePathNotFound { path: String },

    // Proxy errors
    #[error("Malformed proxy frame: {frame}")]
    MalformedFrame { frame: String },

    #[error("Unknown proxy request kind: {kind}")]
    UnknownRequestKind { kind: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Timed out waiting for the host edit session")]
    EditSessionTimeout,

    #[error("Proxy address variable {var} is not set")]
    ProxyAddressMissing { var: String },

    // Registry errors
    #[error("No candidate gatherer registered for buffer {buffer}")]
    NoGathererRegistered { buffer: u64 },

    #[error("Invalid line range: '{range}'. Use format like '3' or '3-9'")]
    InvalidLineRange { range: String },

    // Plumbing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in git output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GinBuffersError
pub type Result<T> = std::result::Result<T, GinBuffersError>;

impl GinBuffersError {
    /// Create a git command failure from captured stderr
    pub fn git_command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::GitCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a rejected-flag error
    pub fn flag_not_allowed(flag: impl Into<String>, command: impl Into<String>) -> Self {
        Self::FlagNotAllowed {
            flag: flag.into(),
            command: command.into(),
        }
    }

    /// Create a branch parse error carrying the offending line
    pub fn branch_parse(line: impl Into<String>) -> Self {
        Self::BranchParse { line: line.into() }
    }

    /// Create a tree lookup error for a missing path
    pub fn tree_path_not_found(path: impl Into<String>) -> Self {
        Self::TreePathNotFound { path: path.into() }
    }

    /// Create a malformed-frame error
    pub fn malformed_frame(frame: impl Into<String>) -> Self {
        Self::MalformedFrame {
            frame: frame.into(),
        }
    }

    /// Create an unknown-request-kind error
    pub fn unknown_request_kind(kind: impl Into<String>) -> Self {
        Self::UnknownRequestKind { kind: kind.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GinBuffersError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_branch_parse_error_carries_line() {
        let err = GinBuffersError::branch_parse("?? not a branch line");
        assert_eq!(
            err.to_string(),
            "Unrecognized branch line: ?? not a branch line"
        );
    }

    #[test]
    fn test_flag_not_allowed_error() {
        let err = GinBuffersError::flag_not_allowed("--frobnicate", "log");
        assert_eq!(
            err.to_string(),
            "Flag '--frobnicate' is not recognized by the log command"
        );
    }

    #[test]
    fn test_git_command_error() {
        let err = GinBuffersError::git_command("status", "fatal: not a git repository");
        assert!(err.to_string().contains("git status failed"));
        assert!(err.to_string().contains("fatal: not a git repository"));
    }

    #[test]
    fn test_no_gatherer_registered_identifies_buffer() {
        let err = GinBuffersError::NoGathererRegistered { buffer: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_malformed_frame_error() {
        let err = GinBuffersError::malformed_frame("no-colon-here");
        assert!(err.to_string().contains("no-colon-here"));
    }
}

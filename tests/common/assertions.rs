//! Shared predicates for integration test assertions

#![allow(dead_code)]

use predicates::prelude::*;
use predicates::str::contains;

/// The single-line error shown outside a repository.
pub fn not_in_git_repo() -> impl Predicate<str> {
    contains("Not in a git repository")
}

/// A rendered status buffer leads with its branch header.
pub fn has_status_header() -> impl Predicate<str> {
    contains("## ")
}

/// Resolved candidates are printed as a JSON array of tagged objects.
pub fn has_candidate_kind(kind: &str) -> impl Predicate<str> {
    contains(format!("\"kind\": \"{kind}\""))
}

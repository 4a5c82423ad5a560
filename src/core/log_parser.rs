//! Line parsers for `git log` and `git reflog` output.
//!
//! Both parsers are lenient: lines that do not contain a recognizable commit
//! hash are skipped, never raised as errors, because log output is free-form
//! (graph drawings, commit messages, diffs) and only the hash-bearing lines
//! matter for candidate resolution.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A commit hash extracted from one log or reflog line.
///
/// Entries preserve input order and duplicates; the hash may be short or
/// full depending on the flags the output was produced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub commit: String,
}

/// Default pattern for `git log` output lines.
///
/// Tolerates plain hex commit lines, `--oneline` short hashes, `--graph`
/// drawing prefixes (`* | \ / + - = < >`, combinations, trailing spaces),
/// and the literal word `commit` optionally followed by a one-character
/// left/right or cherry marker before the hash.
static LOG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ *|\\/+=<>-]*(?:commit (?:[-+=<>] )?)?([0-9a-f]{7,40})\b")
        .expect("log pattern is valid")
});

/// Default pattern for `git reflog` output lines: a hash at line start,
/// unanchored at the end so trailing ref/action text is ignored.
static REFLOG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]{7,40})\b").expect("reflog pattern is valid"));

/// Parse `git log` output lines into commit entries.
///
/// Empty lines are dropped before matching. Each remaining line is tested
/// against `pattern` if supplied, else the built-in default; non-matching
/// lines produce no entry.
pub fn parse_log(lines: &[&str], pattern: Option<&Regex>) -> Vec<LogEntry> {
    collect_entries(lines, pattern.unwrap_or(&LOG_PATTERN))
}

/// Parse `git reflog` output lines into commit entries.
pub fn parse_reflog(lines: &[&str], pattern: Option<&Regex>) -> Vec<LogEntry> {
    collect_entries(lines, pattern.unwrap_or(&REFLOG_PATTERN))
}

fn collect_entries(lines: &[&str], pattern: &Regex) -> Vec<LogEntry> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            pattern.captures(line).map(|caps| LogEntry {
                commit: caps[1].to_string(),
            })
        })
        .collect()
}

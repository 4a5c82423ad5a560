//! Strict parser for `git branch -vv` output.
//!
//! This module defines [`Branch`] and [`parse_branches`] which turn the raw
//! bytes of `git branch -vv` into typed entries. Unlike the log/reflog/status
//! parsers, an unrecognized line here fails the whole call: branch listing
//! output is fully regular, so a non-matching line means the output format
//! assumption is broken and rendering a partial buffer would be misleading.
//!
//! # Public API
//! - [`Branch`]: Tagged union over local, remote-tracking and alias lines
//! - [`parse_branches`]: Whole-output parser with ordered pattern dispatch
//!
//! # Matching Order
//! Patterns are tried in a fixed, exclusive order per line:
//! 1. **Alias**: `  remotes/<remote>/<branch> -> <origin>`
//! 2. **Remote**: `  remotes/<remote>/<branch> <hash> <message>`
//! 3. **Local**: `[* ] <branch> <hash> [<upstream>[: ...]] <message>`

use crate::core::error::{GinBuffersError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// One entry of `git branch -vv` output.
///
/// Every variant stores `record`, the raw input line, so callers can render
/// the listing verbatim while still resolving typed fields from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Branch {
    Local {
        active: bool,
        branch: String,
        commit: String,
        upstream: Option<String>,
        message: String,
        record: String,
    },
    Remote {
        target: String,
        remote: String,
        branch: String,
        commit: String,
        message: String,
        record: String,
    },
    Alias {
        target: String,
        remote: String,
        branch: String,
        origin: String,
        record: String,
    },
}

impl Branch {
    /// The raw input line this entry was parsed from.
    pub fn record(&self) -> &str {
        match self {
            Branch::Local { record, .. }
            | Branch::Remote { record, .. }
            | Branch::Alias { record, .. } => record,
        }
    }

    /// The name usable as a commitish for this entry.
    pub fn name(&self) -> &str {
        match self {
            Branch::Local { branch, .. } => branch,
            Branch::Remote { target, .. } => target,
            Branch::Alias { target, .. } => target,
        }
    }
}

static ALIAS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  (remotes/([^/ ]+)/(\S+))\s+-> (\S+)$").expect("alias pattern is valid")
});

static REMOTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  (remotes/([^/ ]+)/(\S+))\s+([0-9a-f]+) (.*)$").expect("remote pattern is valid")
});

static LOCAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([* ]) (\(.+\)|\S+)\s+([0-9a-f]+) (?:\[([^\]:]+)(?::[^\]]*)?\] )?(.*)$")
        .expect("local pattern is valid")
});

fn alias_from(caps: &Captures, record: &str) -> Branch {
    Branch::Alias {
        target: caps[1].to_string(),
        remote: caps[2].to_string(),
        branch: caps[3].to_string(),
        origin: caps[4].to_string(),
        record: record.to_string(),
    }
}

fn remote_from(caps: &Captures, record: &str) -> Branch {
    Branch::Remote {
        target: caps[1].to_string(),
        remote: caps[2].to_string(),
        branch: caps[3].to_string(),
        commit: caps[4].to_string(),
        message: caps[5].to_string(),
        record: record.to_string(),
    }
}

fn local_from(caps: &Captures, record: &str) -> Branch {
    Branch::Local {
        active: &caps[1] == "*",
        branch: caps[2].to_string(),
        commit: caps[3].to_string(),
        upstream: caps.get(4).map(|m| m.as_str().to_string()),
        message: caps[5].to_string(),
        record: record.to_string(),
    }
}

/// Ordered (pattern, constructor) rules; the first matching rule wins.
fn rules() -> [(&'static Regex, fn(&Captures, &str) -> Branch); 3] {
    [
        (&ALIAS_PATTERN, alias_from),
        (&REMOTE_PATTERN, remote_from),
        (&LOCAL_PATTERN, local_from),
    ]
}

/// Parse raw `git branch -vv` stdout into branch entries.
///
/// The input is decoded as UTF-8 and split on `\n` with exactly one trailing
/// empty line stripped. Any line matching none of the three patterns fails
/// the whole call with [`GinBuffersError::BranchParse`] carrying that line.
pub fn parse_branches(bytes: &[u8]) -> Result<Vec<Branch>> {
    let text = String::from_utf8(bytes.to_vec())?;
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }

    let rules = rules();
    let mut branches = Vec::with_capacity(lines.len());
    for line in lines {
        let parsed = rules
            .iter()
            .find_map(|(pattern, construct)| pattern.captures(line).map(|c| construct(&c, line)));
        match parsed {
            Some(branch) => branches.push(branch),
            None => return Err(GinBuffersError::branch_parse(line)),
        }
    }
    Ok(branches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
* main                  1a2b3c4 [origin/main] Add proxy server
  topic/parser          5d6e7f8 [origin/topic/parser: ahead 2, behind 1] Rework patterns
  standalone            9a8b7c6 Local only work
  remotes/origin/HEAD   -> origin/main
  remotes/origin/main   1a2b3c4 Add proxy server
";

    #[test]
    fn test_parse_mixed_sample() -> Result<()> {
        let branches = parse_branches(SAMPLE.as_bytes())?;
        assert_eq!(branches.len(), 5);

        match &branches[0] {
            Branch::Local {
                active,
                branch,
                commit,
                upstream,
                message,
                ..
            } => {
                assert!(*active);
                assert_eq!(branch, "main");
                assert_eq!(commit, "1a2b3c4");
                assert_eq!(upstream.as_deref(), Some("origin/main"));
                assert_eq!(message, "Add proxy server");
            }
            other => panic!("expected local branch, got {other:?}"),
        }

        match &branches[1] {
            Branch::Local {
                active, upstream, ..
            } => {
                assert!(!*active);
                assert_eq!(upstream.as_deref(), Some("origin/topic/parser"));
            }
            other => panic!("expected local branch, got {other:?}"),
        }

        match &branches[2] {
            Branch::Local { upstream, .. } => assert!(upstream.is_none()),
            other => panic!("expected local branch, got {other:?}"),
        }

        match &branches[3] {
            Branch::Alias {
                target,
                remote,
                branch,
                origin,
                ..
            } => {
                assert_eq!(target, "remotes/origin/HEAD");
                assert_eq!(remote, "origin");
                assert_eq!(branch, "HEAD");
                assert_eq!(origin, "origin/main");
            }
            other => panic!("expected alias, got {other:?}"),
        }

        match &branches[4] {
            Branch::Remote {
                target,
                remote,
                branch,
                commit,
                message,
                ..
            } => {
                assert_eq!(target, "remotes/origin/main");
                assert_eq!(remote, "origin");
                assert_eq!(branch, "main");
                assert_eq!(commit, "1a2b3c4");
                assert_eq!(message, "Add proxy server");
            }
            other => panic!("expected remote branch, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_records_reproduce_input_in_order() -> Result<()> {
        let branches = parse_branches(SAMPLE.as_bytes())?;
        let rebuilt: String = branches
            .iter()
            .map(|b| format!("{}\n", b.record()))
            .collect();
        assert_eq!(rebuilt, SAMPLE);
        Ok(())
    }

    #[test]
    fn test_detached_head_line() -> Result<()> {
        let input = b"* (HEAD detached at 1a2b3c4) 1a2b3c4 Some commit\n";
        let branches = parse_branches(input)?;
        match &branches[0] {
            Branch::Local { active, branch, .. } => {
                assert!(*active);
                assert_eq!(branch, "(HEAD detached at 1a2b3c4)");
            }
            other => panic!("expected local branch, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_unrecognized_line_fails_whole_call() {
        let input = b"* main 1a2b3c4 ok line\ngarbage that matches nothing\n";
        let err = parse_branches(input).unwrap_err();
        match err {
            GinBuffersError::BranchParse { line } => {
                assert_eq!(line, "garbage that matches nothing");
            }
            other => panic!("expected BranchParse, got {other}"),
        }
    }

    #[test]
    fn test_only_one_trailing_newline_tolerated() {
        // Two trailing newlines leave a genuinely empty line, which is a
        // parse failure rather than something to silently filter.
        let input = b"* main 1a2b3c4 message\n\n";
        assert!(parse_branches(input).is_err());
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        let branches = parse_branches(b"")?;
        assert!(branches.is_empty());
        Ok(())
    }
}

//! Parser for `git status --short --branch` output.
//!
//! The first line must be the `## ...` branch header and is parsed into
//! [`StatusHeader`]; every following line is parsed into a [`StatusEntry`].
//! Body lines that match no known shape are skipped, matching the lenient
//! behavior of the log parsers.
//!
//! Paths may be double-quoted with C-style escapes (git quotes anything
//! containing spaces or special bytes). Renames use the fixed ` -> `
//! separator between the quoted-or-bare original and new paths; the
//! separator is not escape-aware, so a filename literally containing
//! `" -> "` misparses. That ambiguity is accepted, not worked around.

use crate::core::error::{GinBuffersError, Result};
use serde::{Deserialize, Serialize};

/// Parsed `## ...` branch header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHeader {
    pub head: String,
    pub upstream: Option<String>,
    pub ahead: usize,
    pub behind: usize,
}

/// One body line of short-format status output.
///
/// `xy` is the two-character status code with `.` standing for "no change
/// in that column"; [`xy_display`] renders the dot back to a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusEntry {
    Changed { xy: String, path: String },
    Unmerged { xy: String, path: String },
    Renamed { xy: String, orig_path: String, path: String },
    Untracked { path: String },
    Ignored { path: String },
}

/// A fully parsed status buffer: the branch header plus its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBuffer {
    pub header: StatusHeader,
    pub entries: Vec<StatusEntry>,
}

impl StatusEntry {
    /// The path this entry refers to (the new path for renames).
    pub fn path(&self) -> &str {
        match self {
            StatusEntry::Changed { path, .. }
            | StatusEntry::Unmerged { path, .. }
            | StatusEntry::Renamed { path, .. }
            | StatusEntry::Untracked { path }
            | StatusEntry::Ignored { path } => path,
        }
    }

    /// The two-character code as git renders it.
    pub fn xy_display(&self) -> String {
        match self {
            StatusEntry::Changed { xy, .. }
            | StatusEntry::Unmerged { xy, .. }
            | StatusEntry::Renamed { xy, .. } => xy.replace('.', " "),
            StatusEntry::Untracked { .. } => "??".to_string(),
            StatusEntry::Ignored { .. } => "!!".to_string(),
        }
    }
}

/// XY combinations git reports for unmerged (conflicted) paths.
const UNMERGED_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Parse `git status --short --branch` output lines.
///
/// The header line is mandatory; its absence is a
/// [`GinBuffersError::StatusHeaderMissing`] error.
pub fn parse_status(lines: &[&str]) -> Result<StatusBuffer> {
    let (first, body) = match lines.split_first() {
        Some((first, body)) if first.starts_with("## ") => (first, body),
        _ => return Err(GinBuffersError::StatusHeaderMissing),
    };

    let header = parse_header(first);
    let entries = body.iter().filter_map(|line| parse_entry(line)).collect();
    Ok(StatusBuffer { header, entries })
}

fn parse_header(line: &str) -> StatusHeader {
    let rest = &line["## ".len()..];

    let (names, brackets) = match rest.find(" [") {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 2..])),
        None => (rest, None),
    };

    let (head, upstream) = match names.split_once("...") {
        Some((head, upstream)) => (head.to_string(), Some(upstream.to_string())),
        None => (names.to_string(), None),
    };

    let mut ahead = 0;
    let mut behind = 0;
    if let Some(brackets) = brackets {
        let brackets = brackets.trim_end_matches(']');
        for part in brackets.split(", ") {
            if let Some(n) = part.strip_prefix("ahead ") {
                ahead = n.parse().unwrap_or(0);
            } else if let Some(n) = part.strip_prefix("behind ") {
                behind = n.parse().unwrap_or(0);
            }
        }
    }

    StatusHeader {
        head,
        upstream,
        ahead,
        behind,
    }
}

fn parse_entry(line: &str) -> Option<StatusEntry> {
    if let Some(rest) = line.strip_prefix("?? ") {
        return Some(StatusEntry::Untracked {
            path: unquote(rest),
        });
    }
    if let Some(rest) = line.strip_prefix("!! ") {
        return Some(StatusEntry::Ignored {
            path: unquote(rest),
        });
    }

    // "<X><Y> <path>" with a space, dot or letter in either column.
    if line.len() < 4 || !line.is_char_boundary(2) || line.as_bytes()[2] != b' ' {
        return None;
    }
    let xy: String = line[..2]
        .chars()
        .map(|c| if c == ' ' { '.' } else { c })
        .collect();
    if !xy.chars().all(|c| c == '.' || c.is_ascii_uppercase()) {
        return None;
    }
    let rest = &line[3..];

    if UNMERGED_CODES.contains(&&line[..2]) {
        return Some(StatusEntry::Unmerged {
            xy,
            path: unquote(rest),
        });
    }

    if let Some((orig, path)) = rest.split_once(" -> ") {
        return Some(StatusEntry::Renamed {
            xy,
            orig_path: unquote(orig),
            path: unquote(path),
        });
    }

    Some(StatusEntry::Changed {
        xy,
        path: unquote(rest),
    })
}

/// Undo git's C-style path quoting: `"a b"` -> `a b`, with `\"`, `\\`,
/// `\t`, `\n`, `\r` and octal `\NNN` escapes. Bare paths pass through.
fn unquote(path: &str) -> String {
    let inner = match path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
        Some(inner) => inner,
        None => return path.to_string(),
    };

    // Octal escapes encode raw bytes of the (usually UTF-8) path, so the
    // unescaping has to happen at the byte level before decoding.
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut bytes = inner.bytes().peekable();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'"') => out.push(b'"'),
            Some(b'\\') => out.push(b'\\'),
            Some(b't') => out.push(b'\t'),
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(d @ b'0'..=b'7') => {
                let mut code = (d - b'0') as u32;
                for _ in 0..2 {
                    match bytes.peek() {
                        Some(&p @ b'0'..=b'7') => {
                            code = code * 8 + (p - b'0') as u32;
                            bytes.next();
                        }
                        _ => break,
                    }
                }
                out.push(code as u8);
            }
            Some(other) => out.push(other),
            None => break,
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

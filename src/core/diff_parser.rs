//! Unified-diff header scanning for per-file fold ranges.
//!
//! A diff buffer folds per file: each `--- <oldPath>` header opens a section
//! that closes on the line before the next `--- ` header, or on the last
//! line of input. The `+++ <newPath>` header that normally follows fills in
//! the new path; a dangling `---` with no `+++` keeps `new_path` unset and
//! the section is kept rather than dropped.

use serde::{Deserialize, Serialize};

/// One file's hunk range inside a unified diff buffer.
///
/// `start` and `end` are inclusive 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSection {
    pub start: usize,
    pub end: usize,
    pub old_path: String,
    pub new_path: Option<String>,
}

/// Strip the optional `\t<metadata>` suffix git appends to header paths.
fn header_path(rest: &str) -> String {
    rest.split('\t').next().unwrap_or(rest).to_string()
}

/// Scan diff buffer lines into per-file fold sections.
pub fn parse_file_sections(lines: &[&str]) -> Vec<FileSection> {
    let mut sections: Vec<FileSection> = Vec::new();
    let mut open: Option<FileSection> = None;

    for (idx, line) in lines.iter().enumerate() {
        let lnum = idx + 1;
        if let Some(rest) = line.strip_prefix("--- ") {
            if let Some(mut section) = open.take() {
                section.end = lnum - 1;
                sections.push(section);
            }
            open = Some(FileSection {
                start: lnum,
                end: lnum,
                old_path: header_path(rest),
                new_path: None,
            });
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            if let Some(section) = open.as_mut() {
                if section.new_path.is_none() {
                    section.new_path = Some(header_path(rest));
                }
            }
        }
    }

    if let Some(mut section) = open.take() {
        section.end = lines.len();
        sections.push(section);
    }
    sections
}

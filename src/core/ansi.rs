//! ANSI decoration extraction for colorized git output.
//!
//! Git's colorized output interleaves SGR/cursor escape sequences with the
//! text the editor buffer actually shows. [`strip_decorations`] removes the
//! sequences and records where each one sat, with offsets corrected so they
//! index into the *stripped* string; the host re-applies them as highlight
//! regions. [`apply_annotations`] is the inverse and underpins the
//! round-trip law: strip + apply == identity for well-formed input.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// One removed escape sequence: the byte offset in the stripped text where
/// it used to sit, plus its literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub offset: usize,
    pub value: String,
}

/// SGR and cursor-control sequences: `ESC [ <params> <final>` with the
/// final byte in `ABCDEFGHJKSTfm`.
static ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[ABCDEFGHJKSTfm]").expect("escape pattern is valid")
});

/// Strip all escape sequences from `text`, returning the plain string and
/// the offset-corrected annotations.
///
/// Matches are collected against the original string first; then, walking
/// the matches from last to first, each removed match's length is
/// subtracted from the offsets of every match after it, so the final
/// offsets remain valid against the stripped string.
pub fn strip_decorations(text: &str) -> (String, Vec<Annotation>) {
    let matches: Vec<(usize, &str)> = ESCAPE_PATTERN
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect();

    let mut offsets: Vec<usize> = matches.iter().map(|(start, _)| *start).collect();
    for i in (0..matches.len()).rev() {
        let removed = matches[i].1.len();
        for offset in offsets.iter_mut().skip(i + 1) {
            *offset -= removed;
        }
    }

    let stripped = ESCAPE_PATTERN.replace_all(text, "").into_owned();
    let annotations = matches
        .into_iter()
        .zip(offsets)
        .map(|((_, value), offset)| Annotation {
            offset,
            value: value.to_string(),
        })
        .collect();
    (stripped, annotations)
}

/// Re-insert annotations into a stripped string, reproducing the original.
pub fn apply_annotations(stripped: &str, annotations: &[Annotation]) -> String {
    let mut restored = stripped.to_string();
    // Inserting from the last annotation backwards keeps earlier offsets
    // valid, and restores original order for annotations sharing an offset.
    for annotation in annotations.iter().rev() {
        restored.insert_str(annotation.offset, &annotation.value);
    }
    restored
}

pub mod branches;
pub mod diff;
pub mod log;
pub mod status;
pub mod tree;

pub use branches::*;
pub use diff::*;
pub use log::*;
pub use status::*;
pub use tree::*;

use crate::core::error::{GinBuffersError, Result};
use crate::core::registry::LineRange;

/// Buffer id the CLI assigns to the buffer it renders; a real host hands
/// out its own ids per buffer.
pub(crate) const CLI_BUFFER: u64 = 1;

/// Split raw CLI tokens into flags (leading `-`) and positional arguments.
pub(crate) fn split_flags(args: &[String]) -> (Vec<String>, Vec<String>) {
    args.iter()
        .cloned()
        .partition(|arg| arg.starts_with('-') && arg != "-")
}

/// Parse a `--resolve` range spec: `7` or `3-9`.
pub(crate) fn parse_line_range(spec: &str) -> Result<LineRange> {
    let invalid = || GinBuffersError::InvalidLineRange {
        range: spec.to_string(),
    };
    match spec.split_once('-') {
        Some((start, end)) => {
            let start: usize = start.trim().parse().map_err(|_| invalid())?;
            let end: usize = end.trim().parse().map_err(|_| invalid())?;
            if start == 0 || end < start {
                return Err(invalid());
            }
            Ok(LineRange::new(start, end))
        }
        None => {
            let lnum: usize = spec.trim().parse().map_err(|_| invalid())?;
            if lnum == 0 {
                return Err(invalid());
            }
            Ok(LineRange::line(lnum))
        }
    }
}

/// Clamp a 1-based inclusive range onto `lines` and borrow the slice.
pub(crate) fn slice_range<'a>(lines: &'a [String], range: LineRange) -> Vec<&'a str> {
    let start = range.start.max(1) - 1;
    let end = range.end.min(lines.len());
    if start >= end {
        return Vec::new();
    }
    lines[start..end].iter().map(String::as_str).collect()
}

//! Rebase todo rewriter, used as `GIT_SEQUENCE_EDITOR`.
//!
//! Turns the `pick` line for the commit named by `GIN_SPLIT_TARGET` (a hash
//! prefix) into an `edit` line, so an interactive rebase stops there. Every
//! other line passes through untouched.

use anyhow::{Context, Result};
use std::fs;

const SPLIT_TARGET_VAR: &str = "GIN_SPLIT_TARGET";

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: gin-rewrite-todo <todo-file>")?;
    let target = std::env::var(SPLIT_TARGET_VAR)
        .with_context(|| format!("{SPLIT_TARGET_VAR} is not set"))?;

    let content =
        fs::read_to_string(&path).with_context(|| format!("reading todo file {path}"))?;
    let rewritten = rewrite_todo(&content, &target);
    fs::write(&path, rewritten).with_context(|| format!("writing todo file {path}"))?;
    Ok(())
}

fn rewrite_todo(content: &str, target: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("pick ") {
            let matches_target = rest
                .split_whitespace()
                .next()
                .is_some_and(|hash| hash.starts_with(target));
            if matches_target {
                out.push(format!("edit {rest}"));
                continue;
            }
        }
        out.push(line.to_string());
    }
    let mut rewritten = out.join("\n");
    if content.ends_with('\n') {
        rewritten.push('\n');
    }
    rewritten
}

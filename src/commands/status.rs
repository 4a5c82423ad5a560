use crate::commands::{parse_line_range, split_flags, CLI_BUFFER};
use crate::core::{
    ansi::strip_decorations,
    error::Result,
    git::GitRunner,
    git_args::{GitArgs, STATUS_FLAGS},
    registry::{ActionRegistry, Candidate},
    status_parser::{parse_status, StatusBuffer, StatusEntry},
};
use colored::*;
use std::env;

pub fn execute_status(args: Vec<String>, resolve: Option<String>) -> Result<()> {
    let (flags, _positionals) = split_flags(&args);
    let runner = GitRunner::discover(env::current_dir()?)?;

    let git_args = GitArgs::new("status")
        .arg("--short")
        .arg("--branch")
        .flags(&flags, STATUS_FLAGS)?;
    let text = runner.run_text(git_args)?;

    let (stripped, _annotations) = strip_decorations(&text);
    let lines: Vec<String> = stripped.lines().map(str::to_string).collect();
    let buffer = parse_status(&line_refs(&lines))?;

    print_status_buffer(&buffer);

    // The gatherer re-parses the selected body lines under the original
    // header, so quoting and rename arrows resolve exactly as on render.
    let registry = ActionRegistry::new();
    let gather_lines = lines.clone();
    registry.register(CLI_BUFFER, move |range| {
        let mut slice: Vec<&str> = vec![&gather_lines[0]];
        for lnum in range.start.max(2)..=range.end {
            match gather_lines.get(lnum - 1) {
                Some(line) => slice.push(line),
                None => break,
            }
        }
        let parsed = parse_status(&slice)?;
        Ok(parsed
            .entries
            .iter()
            .map(|entry| Candidate::File {
                path: entry.path().to_string(),
            })
            .collect())
    });

    if let Some(spec) = resolve {
        let range = parse_line_range(&spec)?;
        let candidates = registry.gather_candidates(CLI_BUFFER, range)?;
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    }

    Ok(())
}

fn line_refs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

fn print_status_buffer(buffer: &StatusBuffer) {
    let header = &buffer.header;
    let mut tracking = String::new();
    if header.ahead > 0 {
        tracking.push_str(&format!(" +{}", header.ahead));
    }
    if header.behind > 0 {
        tracking.push_str(&format!(" -{}", header.behind));
    }
    match &header.upstream {
        Some(upstream) => println!(
            "{} {}...{}{}",
            "##".bright_black(),
            header.head.blue(),
            upstream.bright_black(),
            tracking.white()
        ),
        None => println!("{} {}", "##".bright_black(), header.head.blue()),
    }

    for entry in &buffer.entries {
        println!("{} {}", colored_xy(entry), render_path(entry));
    }
}

fn colored_xy(entry: &StatusEntry) -> ColoredString {
    let xy = entry.xy_display();
    match entry {
        StatusEntry::Unmerged { .. } => xy.red().bold(),
        StatusEntry::Untracked { .. } => xy.cyan(),
        StatusEntry::Ignored { .. } => xy.bright_black(),
        StatusEntry::Changed { .. } | StatusEntry::Renamed { .. } => {
            // Staged column green, worktree column red, like git itself.
            if xy.starts_with(' ') {
                xy.red()
            } else {
                xy.green()
            }
        }
    }
}

fn render_path(entry: &StatusEntry) -> String {
    match entry {
        StatusEntry::Renamed {
            orig_path, path, ..
        } => format!("{orig_path} -> {path}"),
        other => other.path().to_string(),
    }
}

use crate::commands::{parse_line_range, slice_range, split_flags, CLI_BUFFER};
use crate::core::{
    ansi::strip_decorations,
    error::Result,
    git::GitRunner,
    git_args::{GitArgs, LOG_FLAGS},
    log_parser::{parse_log, parse_reflog},
    registry::{ActionRegistry, Candidate},
};
use std::env;

#[derive(Debug, Clone, Copy)]
enum LogKind {
    Log,
    Reflog,
}

pub fn execute_log(args: Vec<String>, resolve: Option<String>) -> Result<()> {
    render_log_buffer(LogKind::Log, args, resolve)
}

pub fn execute_reflog(args: Vec<String>, resolve: Option<String>) -> Result<()> {
    render_log_buffer(LogKind::Reflog, args, resolve)
}

fn render_log_buffer(kind: LogKind, args: Vec<String>, resolve: Option<String>) -> Result<()> {
    let (flags, positionals) = split_flags(&args);
    let runner = GitRunner::discover(env::current_dir()?)?;

    let subcommand = match kind {
        LogKind::Log => "log",
        LogKind::Reflog => "reflog",
    };
    let mut git_args = GitArgs::new(subcommand).flags(&flags, LOG_FLAGS)?;
    for positional in &positionals {
        git_args = git_args.arg(positional);
    }

    let text = runner.run_text(git_args)?;
    // Render with whatever colors git produced; parse the plain text.
    print!("{text}");

    let (stripped, _annotations) = strip_decorations(&text);
    let lines: Vec<String> = stripped.lines().map(str::to_string).collect();
    log::debug!(
        "rendered {subcommand} buffer with {} lines",
        lines.len()
    );

    let registry = ActionRegistry::new();
    registry.register(CLI_BUFFER, move |range| {
        let slice = slice_range(&lines, range);
        let entries = match kind {
            LogKind::Log => parse_log(&slice, None),
            LogKind::Reflog => parse_reflog(&slice, None),
        };
        Ok(entries
            .into_iter()
            .map(|entry| Candidate::Commit {
                commit: entry.commit,
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

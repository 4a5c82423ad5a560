use crate::commands::{parse_line_range, slice_range, split_flags, CLI_BUFFER};
use crate::core::{
    ansi::strip_decorations,
    branch_parser::{parse_branches, Branch},
    error::Result,
    git::GitRunner,
    git_args::{GitArgs, BRANCH_FLAGS},
    print_info, print_section_header,
    registry::{ActionRegistry, Candidate},
};
use colored::*;
use std::env;

pub fn execute_branches(args: Vec<String>, resolve: Option<String>) -> Result<()> {
    let (flags, positionals) = split_flags(&args);
    let runner = GitRunner::discover(env::current_dir()?)?;

    let mut git_args = GitArgs::new("branch").arg("-vv").flags(&flags, BRANCH_FLAGS)?;
    for positional in &positionals {
        git_args = git_args.arg(positional);
    }

    let text = runner.run_text(git_args)?;
    let (stripped, _annotations) = strip_decorations(&text);
    let branches = parse_branches(stripped.as_bytes())?;

    if branches.is_empty() {
        print_info("No branches found. Make your first commit to create one.");
        return Ok(());
    }

    print_section_header("Branches");
    for branch in &branches {
        print_branch_line(branch);
    }
    println!();

    // One rendered line per entry, so the gatherer maps line numbers
    // straight onto the parsed records.
    let names: Vec<String> = branches.iter().map(|b| b.name().to_string()).collect();
    let registry = ActionRegistry::new();
    registry.register(CLI_BUFFER, move |range| {
        Ok(slice_range(&names, range)
            .into_iter()
            .map(|name| Candidate::Branch {
                branch: name.to_string(),
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

fn print_branch_line(branch: &Branch) {
    match branch {
        Branch::Local {
            active,
            branch,
            commit,
            upstream,
            message,
            ..
        } => {
            let marker = if *active { "*".green() } else { " ".normal() };
            let upstream = upstream
                .as_ref()
                .map(|u| format!("[{u}] "))
                .unwrap_or_default();
            println!(
                "{marker} {} {} {}{}",
                branch.blue(),
                commit.yellow(),
                upstream.bright_black(),
                message
            );
        }
        Branch::Remote {
            target,
            commit,
            message,
            ..
        } => {
            println!("  {} {} {}", target.red(), commit.yellow(), message);
        }
        Branch::Alias { target, origin, .. } => {
            println!("  {} {} {}", target.red(), "->".bright_black(), origin.blue());
        }
    }
}

use clap::{Parser, Subcommand};
use gin_buffers::commands::*;
use gin_buffers::core::{
    error::{GinBuffersError, Result},
    print_error,
};
use std::env;

#[derive(Parser)]
#[command(name = "gin-buffers")]
#[command(about = "Interactive git buffers: porcelain parsing and prompt proxying")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a log buffer
    Log {
        /// Flags and revisions passed through to `git log`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Resolve a line range (e.g. "2" or "3-9") to commit candidates
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Render a reflog buffer
    Reflog {
        /// Flags passed through to `git reflog`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Resolve a line range to commit candidates
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Render a branch listing buffer
    Branches {
        /// Flags passed through to `git branch -vv`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Resolve a line range to branch candidates
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Render a short status buffer
    Status {
        /// Flags passed through to `git status --short --branch`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Resolve a line range to file candidates
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Render a repository tree buffer
    Tree {
        /// Commitish to list (defaults to HEAD)
        commitish: Option<String>,
        /// Expand the branch at this path (repeatable)
        #[arg(long)]
        expand: Vec<String>,
        /// Print the tree as JSON instead of rows
        #[arg(long)]
        json: bool,
        /// Resolve a line range to file candidates
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Render a diff buffer
    Diff {
        /// Flags, revisions and paths passed through to `git diff`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Print the per-file fold sections as JSON
        #[arg(long)]
        sections: bool,
        /// Resolve a line range to file candidates
        #[arg(long)]
        resolve: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = dispatch(cli.command) {
        // One highlighted line for the user; full detail in the debug log.
        ::log::debug!("command failed: {e:?}");
        if let GinBuffersError::NotInGitRepo = e {
            print_error("Not in a git repository");
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Log { args, resolve } => execute_log(args, resolve),
        Commands::Reflog { args, resolve } => execute_reflog(args, resolve),
        Commands::Branches { args, resolve } => execute_branches(args, resolve),
        Commands::Status { args, resolve } => execute_status(args, resolve),
        Commands::Tree {
            commitish,
            expand,
            json,
            resolve,
        } => execute_tree(commitish, expand, json, resolve),
        Commands::Diff {
            args,
            sections,
            resolve,
        } => execute_diff(args, sections, resolve),
    }
}

//! Construction of `git` argument vectors.
//!
//! Every buffer feature shells out as `git <subcommand> [flags...] [--]
//! [paths...]`. User-supplied flags pass through to git unvalidated except
//! for a per-command allow-list: a flag outside the list is rejected before
//! anything is spawned, so typos surface as one clear message instead of a
//! git usage dump inside a buffer.

use crate::core::error::{GinBuffersError, Result};

/// Flags the log buffer recognizes and forwards to `git log`.
pub const LOG_FLAGS: &[&str] = &[
    "--abbrev",
    "--abbrev-commit",
    "--all",
    "--all-match",
    "--ancestry-path",
    "--author",
    "--author-date-order",
    "--basic-regexp",
    "--before",
    "--binary",
    "--boundary",
    "--branches",
    "--cherry",
    "--cherry-mark",
    "--cherry-pick",
    "--children",
    "--color",
    "--color-moved",
    "--color-words",
    "--committer",
    "--date",
    "--date-order",
    "--decorate",
    "--decorate-refs",
    "--decorate-refs-exclude",
    "--dense",
    "--diff-filter",
    "--dirstat",
    "--do-walk",
    "--dst-prefix",
    "--encoding",
    "--exclude",
    "--expand-tabs",
    "--extended-regexp",
    "--find-copies",
    "--find-copies-harder",
    "--find-object",
    "--find-renames",
    "--first-parent",
    "--fixed-strings",
    "--follow",
    "--format",
    "--full-diff",
    "--full-history",
    "--full-index",
    "--function-context",
    "--glob",
    "--graph",
    "--grep",
    "--grep-reflog",
    "--histogram",
    "--ignore-all-space",
    "--ignore-blank-lines",
    "--ignore-cr-at-eol",
    "--ignore-missing",
    "--ignore-space-at-eol",
    "--ignore-space-change",
    "--indent-heuristic",
    "--inter-hunk-context",
    "--invert-grep",
    "--irreversible-delete",
    "--left-only",
    "--left-right",
    "--line-prefix",
    "--log-size",
    "--max-count",
    "--max-parents",
    "--merge",
    "--merges",
    "--min-parents",
    "--minimal",
    "--name-only",
    "--name-status",
    "--no-abbrev",
    "--no-abbrev-commit",
    "--no-color",
    "--no-decorate",
    "--no-expand-tabs",
    "--no-max-parents",
    "--no-merges",
    "--no-min-parents",
    "--no-notes",
    "--no-patch",
    "--no-prefix",
    "--no-renames",
    "--no-textconv",
    "--no-walk",
    "--not",
    "--notes",
    "--numstat",
    "--oneline",
    "--parents",
    "--patch",
    "--patch-with-raw",
    "--patch-with-stat",
    "--patience",
    "--pickaxe-all",
    "--pickaxe-regex",
    "--pretty",
    "--raw",
    "--reflog",
    "--regexp-ignore-case",
    "--relative",
    "--relative-date",
    "--remotes",
    "--remove-empty",
    "--reverse",
    "--right-only",
    "--shortstat",
    "--show-linear-break",
    "--show-notes",
    "--show-pulls",
    "--show-signature",
    "--simplify-by-decoration",
    "--simplify-merges",
    "--since",
    "--since-as-filter",
    "--skip",
    "--source",
    "--sparse",
    "--src-prefix",
    "--stat",
    "--stat-count",
    "--stat-graph-width",
    "--stat-name-width",
    "--stat-width",
    "--stdin",
    "--summary",
    "--tags",
    "--text",
    "--textconv",
    "--topo-order",
    "--unified",
    "--until",
    "--walk-reflogs",
    "--word-diff",
    "--word-diff-regex",
    "--ws-error-highlight",
    "-C",
    "-E",
    "-F",
    "-G",
    "-L",
    "-M",
    "-P",
    "-S",
    "-U",
    "-W",
    "-b",
    "-c",
    "-g",
    "-i",
    "-m",
    "-n",
    "-p",
    "-r",
    "-t",
    "-u",
    "-w",
    "-z",
];

/// Flags the diff buffer forwards to `git diff`.
pub const DIFF_FLAGS: &[&str] = &[
    "--cached",
    "--color",
    "--color-moved",
    "--color-words",
    "--diff-filter",
    "--find-copies",
    "--find-renames",
    "--histogram",
    "--ignore-all-space",
    "--ignore-blank-lines",
    "--ignore-space-change",
    "--merge-base",
    "--minimal",
    "--name-only",
    "--name-status",
    "--no-color",
    "--no-renames",
    "--numstat",
    "--patience",
    "--raw",
    "--shortstat",
    "--stat",
    "--staged",
    "--summary",
    "--unified",
    "--word-diff",
    "-M",
    "-R",
    "-U",
    "-b",
    "-p",
    "-w",
];

/// Flags the branch buffer forwards to `git branch`.
pub const BRANCH_FLAGS: &[&str] = &[
    "--all",
    "--contains",
    "--ignore-case",
    "--list",
    "--merged",
    "--no-contains",
    "--no-merged",
    "--points-at",
    "--remotes",
    "--sort",
    "-a",
    "-i",
    "-r",
];

/// Flags the status buffer forwards to `git status`.
pub const STATUS_FLAGS: &[&str] = &[
    "--ahead-behind",
    "--find-renames",
    "--ignore-submodules",
    "--ignored",
    "--no-ahead-behind",
    "--no-renames",
    "--renames",
    "--untracked-files",
    "-u",
];

/// The flag name alone: `--pretty=oneline` checks as `--pretty`, and a
/// short flag with a joined value like `-U3` checks as `-U`.
fn flag_name(flag: &str) -> &str {
    if let Some(idx) = flag.find('=') {
        return &flag[..idx];
    }
    if flag.len() > 2 && !flag.starts_with("--") {
        return &flag[..2];
    }
    flag
}

/// Reject any flag outside the command's allow-list.
pub fn validate_flags(flags: &[String], allowed: &[&str], command: &str) -> Result<()> {
    for flag in flags {
        if !allowed.contains(&flag_name(flag)) {
            return Err(GinBuffersError::flag_not_allowed(flag, command));
        }
    }
    Ok(())
}

/// Builder for one `git` invocation's argument vector.
#[derive(Debug, Clone, Default)]
pub struct GitArgs {
    subcommand: String,
    args: Vec<String>,
    paths: Vec<String>,
}

impl GitArgs {
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            args: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// Append one flag or positional argument (e.g. a commitish).
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append user-supplied flags after checking them against `allowed`.
    pub fn flags(mut self, flags: &[String], allowed: &[&str]) -> Result<Self> {
        validate_flags(flags, allowed, &self.subcommand)?;
        self.args.extend(flags.iter().cloned());
        Ok(self)
    }

    /// Append paths, separated from revisions by `--` at build time.
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// The final argument vector, without the leading `git`.
    pub fn build(self) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.args.len() + 1 + self.paths.len());
        argv.push(self.subcommand);
        argv.extend(self.args);
        if !self.paths.is_empty() {
            argv.push("--".to_string());
            argv.extend(self.paths);
        }
        argv
    }
}

//! Spawning `git` and capturing its output.
//!
//! [`GitRunner`] is the single place a `git` subprocess is created. It pins
//! the working directory to the enclosing worktree, injects the prompt-proxy
//! environment when one is wired up, and maps non-zero exits to a typed
//! error carrying the trimmed stderr. All repository knowledge flows through
//! the text these commands print; `.git` internals are never read directly.

use crate::core::error::{GinBuffersError, Result};
use crate::core::git_args::GitArgs;
use crate::proxy::ProxyServer;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct GitRunner {
    worktree: PathBuf,
    env: Vec<(String, String)>,
}

impl GitRunner {
    /// Resolve the worktree enclosing `path` by asking git itself.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path.as_ref())
            .output()?;
        if !output.status.success() {
            return Err(GinBuffersError::NotInGitRepo);
        }
        let toplevel = String::from_utf8(output.stdout)?;
        Ok(Self::new(PathBuf::from(toplevel.trim_end())))
    }

    /// Use an already-known worktree directory.
    pub fn new(worktree: PathBuf) -> Self {
        Self {
            worktree,
            env: Vec::new(),
        }
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    /// Wire the prompt proxy into every spawned command's environment.
    pub fn with_prompt_proxy(mut self, proxy: &ProxyServer) -> Result<Self> {
        self.env.extend(proxy.git_env()?);
        Ok(self)
    }

    /// Add one extra environment variable for spawned commands.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run one git command, returning raw stdout bytes.
    pub fn run(&self, args: GitArgs) -> Result<Vec<u8>> {
        let subcommand = args.subcommand().to_string();
        let argv = args.build();
        log::debug!("running git {}", argv.join(" "));

        let mut cmd = Command::new("git");
        cmd.args(&argv).current_dir(&self.worktree);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GinBuffersError::git_command(
                subcommand,
                stderr.trim().to_string(),
            ));
        }
        Ok(output.stdout)
    }

    /// Run one git command, returning stdout decoded as UTF-8.
    pub fn run_text(&self, args: GitArgs) -> Result<String> {
        let stdout = self.run(args)?;
        Ok(String::from_utf8(stdout)?)
    }
}

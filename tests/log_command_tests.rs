use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod log_command_tests {
    use super::*;

    #[test]
    fn test_log_renders_oneline_buffer() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let hash = head_short_hash(&repo.path)?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["log", "--oneline"])
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(predicate::str::contains(hash.as_str()))
            .stdout(predicate::str::contains("Initial commit"));

        Ok(())
    }

    #[test]
    fn test_log_resolve_returns_commit_candidates() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "second.txt", "more\n")?;
        git_add(&repo.path, "second.txt")?;
        git_commit(&repo.path, "Second commit")?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["log", "--resolve", "1-2", "--oneline"])
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(assertions::has_candidate_kind("commit"));

        Ok(())
    }

    #[test]
    fn test_log_rejects_unknown_flag_before_spawning() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["log", "--frobnicate"])
            .current_dir(&repo.path)
            .assert()
            .failure()
            .stdout(predicate::str::contains("--frobnicate"))
            .stdout(predicate::str::contains("not recognized"));

        Ok(())
    }

    #[test]
    fn test_log_graph_output_still_resolves() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let hash = head_short_hash(&repo.path)?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["log", "--resolve", "1", "--oneline", "--graph"])
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("* {hash}")))
            .stdout(assertions::has_candidate_kind("commit"));

        Ok(())
    }

    #[test]
    fn test_reflog_resolves_head_movements() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "second.txt", "more\n")?;
        git_add(&repo.path, "second.txt")?;
        git_commit(&repo.path, "Second commit")?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["reflog", "--resolve", "1-2"])
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(assertions::has_candidate_kind("commit"));

        Ok(())
    }

    #[test]
    fn test_log_not_in_git_repo() -> anyhow::Result<()> {
        use tempfile::TempDir;
        let temp_dir = TempDir::new()?;
        let non_repo_path = temp_dir.path().join("not-a-repo");
        std::fs::create_dir(&non_repo_path)?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.arg("log")
            .current_dir(non_repo_path)
            .assert()
            .failure()
            .stdout(assertions::not_in_git_repo());

        Ok(())
    }
}

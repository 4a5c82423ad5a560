use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod branches_command_tests {
    use super::*;

    #[test]
    fn test_branches_lists_local_branches() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        git(&repo.path, &["branch", "topic"])?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.arg("branches")
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(predicate::str::contains("topic"))
            .stdout(predicate::str::contains("Initial commit"));

        Ok(())
    }

    #[test]
    fn test_branches_marks_checked_out_branch() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        git(&repo.path, &["checkout", "-b", "feature/shiny"])?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.arg("branches")
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(predicate::str::contains("* feature/shiny"));

        Ok(())
    }

    #[test]
    fn test_branches_resolve_returns_branch_candidates() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        git(&repo.path, &["branch", "aaa-first"])?;

        // Branches list alphabetically: aaa-first is line 1.
        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.args(["branches", "--resolve", "1"])
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(assertions::has_candidate_kind("branch"))
            .stdout(predicate::str::contains("aaa-first"));

        Ok(())
    }

    #[test]
    fn test_branches_empty_repository() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.arg("branches")
            .current_dir(&repo.path)
            .assert()
            .success()
            .stdout(predicate::str::contains("No branches found"));

        Ok(())
    }

    #[test]
    fn test_branches_not_in_git_repo() -> anyhow::Result<()> {
        use tempfile::TempDir;
        let temp_dir = TempDir::new()?;
        let non_repo_path = temp_dir.path().join("not-a-repo");
        std::fs::create_dir(&non_repo_path)?;

        let mut cmd = Command::cargo_bin("gin-buffers")?;
        cmd.arg("branches")
            .current_dir(non_repo_path)
            .assert()
            .failure()
            .stdout(assertions::not_in_git_repo());

        Ok(())
    }
}

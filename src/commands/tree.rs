use crate::commands::{parse_line_range, CLI_BUFFER};
use crate::core::{
    error::Result,
    git::GitRunner,
    git_args::GitArgs,
    registry::{ActionRegistry, Candidate},
    tree::{build_tree, parse_ls_tree, visible_rows, with_collapsed, TreeNode},
};
use colored::*;
use std::env;

pub fn execute_tree(
    commitish: Option<String>,
    expand: Vec<String>,
    json: bool,
    resolve: Option<String>,
) -> Result<()> {
    let runner = GitRunner::discover(env::current_dir()?)?;
    let rev = commitish.unwrap_or_else(|| "HEAD".to_string());

    let text = runner.run_text(GitArgs::new("ls-tree").arg("-r").arg(&rev))?;
    let entries = parse_ls_tree(&text);

    let root_label = runner
        .worktree()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| rev.clone());
    let mut tree = build_tree(&entries, &root_label);
    for path in &expand {
        tree = with_collapsed(&tree, path, false)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        for row in visible_rows(&tree) {
            print_tree_row(row.depth, row.node);
        }
    }

    let row_values: Vec<String> = visible_rows(&tree)
        .iter()
        .map(|row| row.node.value().to_string())
        .collect();
    let registry = ActionRegistry::new();
    registry.register(CLI_BUFFER, move |range| {
        let start = range.start.max(1) - 1;
        let end = range.end.min(row_values.len());
        let selected = if start >= end {
            &[][..]
        } else {
            &row_values[start..end]
        };
        Ok(selected
            .iter()
            .map(|value| Candidate::File {
                path: value.clone(),
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

fn print_tree_row(depth: usize, node: &TreeNode) {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::Branch {
            label, collapsed, ..
        } => {
            let marker = if *collapsed { "▸" } else { "▾" };
            println!("{indent}{} {}", marker.bright_black(), label.blue());
        }
        TreeNode::Leaf { label, .. } => {
            println!("{indent}  {label}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LineRange;
    use crate::core::tree::{LsTreeEntry, ObjectKind};

    fn blob(path: &str) -> LsTreeEntry {
        LsTreeEntry {
            mode: "100644".to_string(),
            kind: ObjectKind::Blob,
            hash: "d670460b4b4aece5915caf5c68d12f560a9fe3e4".to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_row_gatherer_resolves_paths() -> Result<()> {
        let tree = build_tree(&[blob("src/main.rs"), blob("README.md")], "repo");
        let expanded = with_collapsed(&tree, "src", false)?;

        let row_values: Vec<String> = visible_rows(&expanded)
            .iter()
            .map(|row| row.node.value().to_string())
            .collect();
        assert_eq!(row_values, vec!["src", "src/main.rs", "README.md"]);

        let registry = ActionRegistry::new();
        registry.register(CLI_BUFFER, move |range| {
            let start = range.start.max(1) - 1;
            let end = range.end.min(row_values.len());
            let selected = if start >= end {
                &[][..]
            } else {
                &row_values[start..end]
            };
            Ok(selected
                .iter()
                .map(|value| Candidate::File {
                    path: value.clone(),
                })
                .collect())
        });

        let candidates = registry.gather_candidates(CLI_BUFFER, LineRange::line(2))?;
        assert_eq!(
            candidates,
            vec![Candidate::File {
                path: "src/main.rs".to_string()
            }]
        );
        Ok(())
    }

    #[test]
    fn test_print_tree_row_does_not_panic() {
        let tree = build_tree(&[blob("src/main.rs")], "repo");
        for row in visible_rows(&tree) {
            print_tree_row(row.depth, row.node);
        }
    }
}

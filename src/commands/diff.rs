use crate::commands::{parse_line_range, split_flags, CLI_BUFFER};
use crate::core::{
    ansi::strip_decorations,
    diff_parser::{parse_file_sections, FileSection},
    error::Result,
    git::GitRunner,
    git_args::{GitArgs, DIFF_FLAGS},
    registry::{ActionRegistry, Candidate},
};
use std::env;

pub fn execute_diff(args: Vec<String>, sections: bool, resolve: Option<String>) -> Result<()> {
    let (flags, positionals) = split_flags(&args);
    let runner = GitRunner::discover(env::current_dir()?)?;

    let mut git_args = GitArgs::new("diff").flags(&flags, DIFF_FLAGS)?;
    for positional in &positionals {
        git_args = git_args.arg(positional);
    }

    let text = runner.run_text(git_args)?;
    print!("{text}");

    let (stripped, _annotations) = strip_decorations(&text);
    let lines: Vec<&str> = stripped.lines().collect();
    let file_sections = parse_file_sections(&lines);
    log::debug!("diff buffer folds into {} sections", file_sections.len());

    if sections {
        println!("{}", serde_json::to_string_pretty(&file_sections)?);
    }

    let registry = ActionRegistry::new();
    let gather_sections = file_sections.clone();
    registry.register(CLI_BUFFER, move |range| {
        Ok(gather_sections
            .iter()
            .filter(|section| section.start <= range.end && range.start <= section.end)
            .map(|section| Candidate::File {
                path: section_path(section),
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

/// The repo-relative path a section refers to, preferring the new side and
/// dropping git's `a/` / `b/` prefixes.
fn section_path(section: &FileSection) -> String {
    let raw = section
        .new_path
        .as_deref()
        .unwrap_or(section.old_path.as_str());
    raw.strip_prefix("b/")
        .or_else(|| raw.strip_prefix("a/"))
        .unwrap_or(raw)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LineRange;

    const DIFF: &[&str] = &[
        "diff --git a/one.rs b/one.rs",
        "--- a/one.rs",
        "+++ b/one.rs",
        "@@ -1 +1 @@",
        "-old",
        "+new",
        "diff --git a/two.rs b/two.rs",
        "--- a/two.rs",
        "+++ b/two.rs",
        "@@ -1 +1 @@",
        " context",
    ];

    fn registry_over(lines: &[&str]) -> ActionRegistry {
        let gather_sections = parse_file_sections(lines);
        let registry = ActionRegistry::new();
        registry.register(CLI_BUFFER, move |range| {
            Ok(gather_sections
                .iter()
                .filter(|section| section.start <= range.end && range.start <= section.end)
                .map(|section| Candidate::File {
                    path: section_path(section),
                })
                .collect())
        });
        registry
    }

    #[test]
    fn test_gatherer_maps_range_to_touched_files() -> Result<()> {
        let registry = registry_over(DIFF);
        let candidates = registry.gather_candidates(CLI_BUFFER, LineRange::new(4, 5))?;
        assert_eq!(
            candidates,
            vec![Candidate::File {
                path: "one.rs".to_string()
            }]
        );

        let candidates = registry.gather_candidates(CLI_BUFFER, LineRange::new(5, 9))?;
        assert_eq!(candidates.len(), 2);
        Ok(())
    }

    #[test]
    fn test_gatherer_outside_any_section() -> Result<()> {
        let registry = registry_over(DIFF);
        let candidates = registry.gather_candidates(CLI_BUFFER, LineRange::line(1))?;
        assert!(candidates.is_empty());
        Ok(())
    }

    #[test]
    fn test_section_path_prefers_new_side() {
        let section = FileSection {
            start: 1,
            end: 4,
            old_path: "a/old.rs".to_string(),
            new_path: Some("b/new.rs".to_string()),
        };
        assert_eq!(section_path(&section), "new.rs");

        let dangling = FileSection {
            start: 1,
            end: 2,
            old_path: "a/only.rs".to_string(),
            new_path: None,
        };
        assert_eq!(section_path(&dangling), "only.rs");
    }
}

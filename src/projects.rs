//! Tmuxinator project launcher collaborator.

use anyhow::{Context, Result};
use std::process::Command;
use tracing::debug;

/// List available tmuxinator project names. A failing or missing
/// tmuxinator reads as "no projects".
pub fn list_projects() -> Result<Vec<String>> {
    let output = Command::new("tmuxinator").arg("list").output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            Ok(parse_project_list(&stdout))
        }
        Ok(out) => {
            debug!(
                "tmuxinator list failed: {}",
                String::from_utf8_lossy(&out.stderr)
            );
            Ok(Vec::new())
        }
        Err(e) => {
            debug!("could not run tmuxinator: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Launch a project by name. Blocks until the launcher completes.
pub fn launch(name: &str) -> Result<()> {
    let output = Command::new("tmuxinator")
        .args(["start", name])
        .output()
        .context("Failed to run tmuxinator start")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("tmuxinator start '{}' failed: {}", name, stderr);
    }

    Ok(())
}

// tmuxinator prints a "tmuxinator projects:" header followed by names laid
// out in columns.
fn parse_project_list(stdout: &str) -> Vec<String> {
    let mut projects = Vec::new();
    for line in stdout.lines() {
        if line.contains("tmuxinator projects") {
            continue;
        }
        projects.extend(line.split_whitespace().map(String::from));
    }
    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_list() {
        let stdout = "tmuxinator projects:\nblog  dotfiles  work\nside-project\n";
        assert_eq!(
            parse_project_list(stdout),
            vec!["blog", "dotfiles", "work", "side-project"]
        );
    }

    #[test]
    fn test_parse_project_list_empty() {
        assert!(parse_project_list("tmuxinator projects:\n").is_empty());
        assert!(parse_project_list("").is_empty());
    }
}

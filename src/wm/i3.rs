//! i3 adapter, driven through `i3-msg` IPC queries.

use anyhow::{Context, Result};
use serde_json::Value;
use std::process::Command;
use tracing::debug;

use super::{render_title, WindowManager};

pub struct I3Wm {
    title_pattern: String,
}

impl I3Wm {
    pub fn new(title_pattern: String) -> Self {
        Self { title_pattern }
    }

    fn locate(&self, session: &str) -> Result<Option<Hit>> {
        let title = render_title(&self.title_pattern, session, "");
        let tree = query("get_tree")?;
        Ok(find_window(&tree, &title, None))
    }
}

impl WindowManager for I3Wm {
    fn focus_session_window(&self, session: &str) -> Result<()> {
        match self.locate(session)? {
            Some(hit) => run_command(&format!("[con_id={}] focus", hit.con_id)),
            None => {
                debug!("no i3 window found for session '{}'", session);
                Ok(())
            }
        }
    }

    fn session_window_visible(&self, session: &str) -> Result<bool> {
        let Some(hit) = self.locate(session)? else {
            // Unknown window: treat as visible so default selection falls
            // back to the same behavior as having no adapter at all.
            debug!("no i3 window found for session '{}'", session);
            return Ok(true);
        };

        let workspaces = query("get_workspaces")?;
        Ok(workspace_visible(&workspaces, &hit.workspace))
    }
}

/// A window container matched by title, and the workspace holding it.
struct Hit {
    con_id: i64,
    workspace: String,
}

fn query(message_type: &str) -> Result<Value> {
    let output = Command::new("i3-msg")
        .args(["-t", message_type])
        .output()
        .context("Failed to run i3-msg. Is i3 running?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("i3-msg -t {} failed: {}", message_type, stderr);
    }

    serde_json::from_slice(&output.stdout)
        .with_context(|| format!("Failed to parse i3-msg -t {} output", message_type))
}

fn run_command(command: &str) -> Result<()> {
    let output = Command::new("i3-msg")
        .arg(command)
        .output()
        .context("Failed to run i3-msg. Is i3 running?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("i3-msg '{}' failed: {}", command, stderr);
    }

    Ok(())
}

/// Depth-first search of the layout tree for a window container whose name
/// contains `title`, remembering the enclosing workspace on the way down.
fn find_window(node: &Value, title: &str, workspace: Option<&str>) -> Option<Hit> {
    let workspace = if node["type"] == "workspace" {
        node["name"].as_str().or(workspace)
    } else {
        workspace
    };

    // Only window containers count; workspaces and outputs also have names.
    if node["window"].is_i64() || node["window_properties"].is_object() {
        if let (Some(name), Some(con_id), Some(ws)) =
            (node["name"].as_str(), node["id"].as_i64(), workspace)
        {
            if name.contains(title) {
                return Some(Hit {
                    con_id,
                    workspace: ws.to_string(),
                });
            }
        }
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(children) = node[key].as_array() {
            for child in children {
                if let Some(hit) = find_window(child, title, workspace) {
                    return Some(hit);
                }
            }
        }
    }

    None
}

fn workspace_visible(workspaces: &Value, name: &str) -> bool {
    workspaces
        .as_array()
        .into_iter()
        .flatten()
        .any(|ws| ws["name"] == name && ws["visible"] == true)
}

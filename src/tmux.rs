// ═══════════════════════════════════════════════════════════════════════════
// TMUX Wrapper Functions
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::{Context, Result};
use std::process::Command;
use tracing::debug;

/// A live tmux session, discovered fresh on every enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub attached: bool,
}

/// A window within a session, addressed by index and name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub session: String,
    pub index: usize,
    pub name: String,
    pub active: bool,
}

impl Window {
    /// Display/cache key in `session:index:name` form.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.session, self.index, self.name)
    }

    /// tmux target in `session:index` form.
    fn target(&self) -> String {
        format!("{}:{}", self.session, self.index)
    }
}

// Format: session_name|session_attached
const SESSION_FORMAT: &str = "#{session_name}|#{session_attached}";
// Format: session_name|window_index|window_name|window_active
const WINDOW_FORMAT: &str = "#{session_name}|#{window_index}|#{window_name}|#{window_active}";

/// List all tmux sessions in server order. No server running is not an
/// error, just an empty list.
pub fn list_sessions() -> Result<Vec<Session>> {
    let output = Command::new("tmux")
        .args(["list-sessions", "-F", SESSION_FORMAT])
        .output()
        .context("Failed to run tmux list-sessions. Is tmux installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("no server running") || stderr.contains("no sessions") {
            return Ok(Vec::new());
        }
        anyhow::bail!("tmux list-sessions failed: {}", stderr);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter_map(parse_session_line).collect())
}

/// List the windows of one session, in window-index order.
pub fn list_windows(session: &str) -> Result<Vec<Window>> {
    let output = Command::new("tmux")
        .args(["list-windows", "-t", session, "-F", WINDOW_FORMAT])
        .output()
        .context("Failed to run tmux list-windows")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // A vanished or unknown session is an empty scope, not a failure.
        if stderr.contains("can't find session") || stderr.contains("no such session") {
            return Ok(Vec::new());
        }
        anyhow::bail!("tmux list-windows failed for '{}': {}", session, stderr);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter_map(parse_window_line).collect())
}

/// Name of the session the most recent client is on, if any.
pub fn current_session() -> Option<String> {
    let output = Command::new("tmux")
        .args(["display-message", "-p", "#{session_name}"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Switch the attached client to another session. Returns `Ok(false)` when
/// there is no client to switch (the caller should attach instead).
pub fn switch_client(session: &str) -> Result<bool> {
    let output = Command::new("tmux")
        .args(["switch-client", "-t", session])
        .output()
        .context("Failed to run tmux switch-client")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("no current client") || stderr.contains("no clients") {
            debug!("switch-client to '{}' found no attached client", session);
            return Ok(false);
        }
        anyhow::bail!("tmux switch-client failed: {}", stderr);
    }

    Ok(true)
}

/// Attach a new client to a session. Blocks until the client detaches.
pub fn attach(session: &str) -> Result<()> {
    let status = Command::new("tmux")
        .args(["attach-session", "-t", session])
        .status()
        .context("Failed to run tmux attach-session")?;

    if !status.success() {
        anyhow::bail!("tmux attach-session failed for '{}'", session);
    }

    Ok(())
}

/// Make a window the active window of its session.
pub fn select_window(window: &Window) -> Result<()> {
    let output = Command::new("tmux")
        .args(["select-window", "-t", &window.target()])
        .output()
        .context("Failed to run tmux select-window")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("tmux select-window failed for '{}': {}", window.target(), stderr);
    }

    Ok(())
}

/// Kill a session. Tolerates the session having already gone away.
pub fn kill_session(name: &str) -> Result<()> {
    let output = Command::new("tmux")
        .args(["kill-session", "-t", name])
        .output()
        .context("Failed to run tmux kill-session")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.contains("no such session") {
            anyhow::bail!("tmux kill-session failed: {}", stderr);
        }
    }

    Ok(())
}

/// Kill a window. Tolerates the window having already gone away.
pub fn kill_window(window: &Window) -> Result<()> {
    let output = Command::new("tmux")
        .args(["kill-window", "-t", &window.target()])
        .output()
        .context("Failed to run tmux kill-window")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.contains("can't find window") {
            anyhow::bail!("tmux kill-window failed: {}", stderr);
        }
    }

    Ok(())
}

fn parse_session_line(line: &str) -> Option<Session> {
    let (name, attached) = line.rsplit_once('|')?;
    if name.is_empty() {
        return None;
    }
    Some(Session {
        name: name.to_string(),
        // session_attached is the number of attached clients
        attached: attached.parse::<u32>().map(|n| n > 0).unwrap_or(false),
    })
}

fn parse_window_line(line: &str) -> Option<Window> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 4 {
        return None;
    }
    Some(Window {
        session: parts[0].to_string(),
        index: parts[1].parse().ok()?,
        name: parts[2].to_string(),
        active: parts[3] == "1",
    })
}

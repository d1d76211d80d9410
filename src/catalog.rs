// ═══════════════════════════════════════════════════════════════════════════
// Session/Window Catalog
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::tmux::{self, Session, Window};

/// Which windows a window-level action considers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Windows of one named session.
    Session(String),
    /// Windows of the session the client is currently on.
    Current,
    /// Windows of every catalogued session.
    All,
}

impl Scope {
    /// Derive the scope from the CLI flags. An explicit `--session` wins;
    /// otherwise `--global-scope` picks between all sessions and the
    /// current one.
    pub fn from_flags(session: Option<String>, global_scope: bool) -> Self {
        match session {
            Some(name) => Scope::Session(name),
            None if global_scope => Scope::All,
            None => Scope::Current,
        }
    }
}

/// Enumerate live sessions in server order, minus the ignore list. An
/// empty result is a valid state that routes the caller to project launch.
pub fn sessions(config: &Config) -> Result<Vec<Session>> {
    let sessions = filter_ignored(tmux::list_sessions()?, &config.ignored_sessions);
    debug!("catalogued {} sessions", sessions.len());
    Ok(sessions)
}

/// Windows in scope, concatenated in catalog order with each session's own
/// window order preserved.
pub fn windows(sessions: &[Session], scope: &Scope) -> Result<Vec<Window>> {
    match scope {
        Scope::Session(name) => tmux::list_windows(name),
        Scope::Current => match tmux::current_session() {
            Some(name) => tmux::list_windows(&name),
            None => Ok(Vec::new()),
        },
        Scope::All => {
            let mut windows = Vec::new();
            for session in sessions {
                windows.extend(tmux::list_windows(&session.name)?);
            }
            Ok(windows)
        }
    }
}

/// The active window of the current session, the anchor for window-level
/// default selection. Advisory: enumeration failures resolve to `None`.
pub fn current_window(current_session: Option<&str>) -> Option<Window> {
    let session = current_session?;
    match tmux::list_windows(session) {
        Ok(windows) => windows.into_iter().find(|w| w.active),
        Err(e) => {
            debug!("could not list windows of '{}': {:#}", session, e);
            None
        }
    }
}

fn filter_ignored(sessions: Vec<Session>, ignored: &[String]) -> Vec<Session> {
    sessions
        .into_iter()
        .filter(|s| !ignored.iter().any(|name| name == &s.name))
        .collect()
}

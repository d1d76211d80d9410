// ═══════════════════════════════════════════════════════════════════════════
// Switcher - menu flows and action dispatch
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::Result;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheStore};
use crate::catalog::{self, Scope};
use crate::config::Config;
use crate::projects;
use crate::resolver;
use crate::rofi;
use crate::tmux::{self, Window};
use crate::wm::{self, WindowManager};

/// What to do with the chosen entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Switch,
    Kill,
}

pub struct Switcher {
    config: Config,
    cache: Cache,
    store: CacheStore,
    wm: Option<Box<dyn WindowManager>>,
}

impl Switcher {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("failed to load config: {:#}", e);
            Config::default()
        });
        let store = CacheStore::open();
        let cache = store.load().unwrap_or_else(|e| {
            warn!("failed to load cache: {:#}", e);
            Cache::default()
        });
        let wm = wm::from_config(&config);
        debug!("loaded cache: {:?}", cache);

        Self {
            config,
            cache,
            store,
            wm,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session flow
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_action(&mut self, action: Action) -> Result<()> {
        let sessions = catalog::sessions(&self.config)?;
        if sessions.is_empty() {
            // No sessions at all: offer to launch a project instead.
            return self.load_project();
        }

        let current = tmux::current_session();
        let names: Vec<String> = sessions.iter().map(|s| s.name.clone()).collect();
        let visible = self.current_window_visible(current.as_deref());
        let default = resolver::default_index(
            &names,
            self.cache.last_session.as_deref(),
            current.as_deref(),
            visible,
        );

        let prompt = match action {
            Action::Switch => "Switch session: ",
            Action::Kill => "Kill session: ",
        };
        let Some(choice) = rofi::select(prompt, &names, default)? else {
            return Ok(());
        };
        let target = &names[choice];

        match action {
            Action::Switch => {
                self.focus_current(current.as_deref());
                switch_to_session(target)?;
                if record_session_switch(&mut self.cache, current) {
                    self.store.save(&self.cache)?;
                }
            }
            Action::Kill => tmux::kill_session(target)?,
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window flow
    // ─────────────────────────────────────────────────────────────────────────

    pub fn window_action(&mut self, action: Action, scope: Scope) -> Result<()> {
        let sessions = catalog::sessions(&self.config)?;
        if sessions.is_empty() {
            return self.load_project();
        }

        let windows = catalog::windows(&sessions, &scope)?;
        if windows.is_empty() {
            rofi::error("There are no windows in scope")?;
            return Ok(());
        }

        let current = tmux::current_session();
        let current_window = catalog::current_window(current.as_deref()).map(|w| w.key());
        let labels: Vec<String> = windows.iter().map(Window::key).collect();
        let visible = self.current_window_visible(current.as_deref());
        let default = resolver::default_index(
            &labels,
            self.cache.last_window.as_deref(),
            current_window.as_deref(),
            visible,
        );

        let prompt = match action {
            Action::Switch => "Switch window: ",
            Action::Kill => "Kill window: ",
        };
        let Some(choice) = rofi::select(prompt, &labels, default)? else {
            return Ok(());
        };
        let target = &windows[choice];

        match action {
            Action::Switch => {
                debug!("switching to window {}", target.key());
                self.focus_current(current.as_deref());
                if tmux::switch_client(&target.session)? {
                    tmux::select_window(target)?;
                } else {
                    // No attached client: make the window active first so
                    // the fresh client lands on it.
                    tmux::select_window(target)?;
                    tmux::attach(&target.session)?;
                }
                if record_window_switch(&mut self.cache, current_window, current) {
                    self.store.save(&self.cache)?;
                }
            }
            Action::Kill => tmux::kill_window(target)?,
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project launch flow
    // ─────────────────────────────────────────────────────────────────────────

    pub fn load_project(&mut self) -> Result<()> {
        let projects = projects::list_projects()?;
        if projects.is_empty() {
            rofi::error("There are no projects available")?;
            return Ok(());
        }

        let Some(choice) = rofi::select("Load project: ", &projects, 0)? else {
            return Ok(());
        };
        let name = &projects[choice];

        let current = tmux::current_session();
        projects::launch(name)?;

        let sessions = catalog::sessions(&self.config)?;
        if !sessions.iter().any(|s| &s.name == name) {
            rofi::error(&format!("Project '{}' did not create a session", name))?;
            return Ok(());
        }

        self.focus_current(current.as_deref());
        switch_to_session(name)?;
        if record_session_switch(&mut self.cache, current) {
            self.store.save(&self.cache)?;
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window manager coordination
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the window hosting the current session is on screen. True
    /// without an adapter, and on any adapter failure: the signal is
    /// advisory and must never break a flow.
    fn current_window_visible(&self, current: Option<&str>) -> bool {
        match (&self.wm, current) {
            (Some(wm), Some(session)) => wm.session_window_visible(session).unwrap_or_else(|e| {
                warn!("window manager visibility query failed: {:#}", e);
                true
            }),
            _ => true,
        }
    }

    /// Re-center the window manager on the current session's window before
    /// a client switch. Failures are logged, never fatal.
    fn focus_current(&self, current: Option<&str>) {
        if let (Some(wm), Some(session)) = (&self.wm, current) {
            if let Err(e) = wm.focus_session_window(session) {
                warn!("window manager focus failed: {:#}", e);
            }
        }
    }
}

impl Default for Switcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Switch the attached client, or attach a new one when none exists.
fn switch_to_session(name: &str) -> Result<()> {
    if !tmux::switch_client(name)? {
        debug!("no attached client, attaching to '{}'", name);
        tmux::attach(name)?;
    }
    Ok(())
}

/// Record the session switched away from. Returns whether the cache
/// changed; an absent prior session never overwrites a present value.
fn record_session_switch(cache: &mut Cache, prior_session: Option<String>) -> bool {
    match prior_session {
        Some(name) => {
            cache.last_session = Some(name);
            true
        }
        None => false,
    }
}

/// Record the window (and session) switched away from. Each half is
/// skipped when the prior value is absent.
fn record_window_switch(
    cache: &mut Cache,
    prior_window: Option<String>,
    prior_session: Option<String>,
) -> bool {
    let mut changed = false;
    if let Some(key) = prior_window {
        cache.last_window = Some(key);
        changed = true;
    }
    if let Some(name) = prior_session {
        cache.last_session = Some(name);
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_session_switch_stores_prior() {
        // Switching away from "work" remembers "work", not the target.
        let mut cache = Cache::default();
        assert!(record_session_switch(&mut cache, Some("work".to_string())));
        assert_eq!(cache.last_session.as_deref(), Some("work"));
    }

    #[test]
    fn test_record_session_switch_without_prior() {
        let mut cache = Cache {
            last_session: Some("work".to_string()),
            last_window: None,
        };
        assert!(!record_session_switch(&mut cache, None));
        // The present value survives.
        assert_eq!(cache.last_session.as_deref(), Some("work"));
    }

    #[test]
    fn test_record_window_switch_stores_both() {
        let mut cache = Cache::default();
        let changed = record_window_switch(
            &mut cache,
            Some("work:1:vim".to_string()),
            Some("work".to_string()),
        );
        assert!(changed);
        assert_eq!(cache.last_window.as_deref(), Some("work:1:vim"));
        assert_eq!(cache.last_session.as_deref(), Some("work"));
    }

    #[test]
    fn test_record_window_switch_partial() {
        let mut cache = Cache {
            last_session: Some("mail".to_string()),
            last_window: Some("mail:0:mutt".to_string()),
        };
        let changed = record_window_switch(&mut cache, Some("work:0:sh".to_string()), None);
        assert!(changed);
        assert_eq!(cache.last_window.as_deref(), Some("work:0:sh"));
        // Absent prior session never clobbers the stored one.
        assert_eq!(cache.last_session.as_deref(), Some("mail"));
    }

    #[test]
    fn test_record_window_switch_nothing_to_record() {
        let mut cache = Cache {
            last_session: Some("mail".to_string()),
            last_window: Some("mail:0:mutt".to_string()),
        };
        let before = cache.clone();
        assert!(!record_window_switch(&mut cache, None, None));
        assert_eq!(cache, before);
    }
}

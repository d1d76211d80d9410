//! Window manager adapters. A capability selected once at startup from
//! config; absent means every visibility query answers true.

mod i3;

use anyhow::Result;

use crate::config::{Config, WmKind};

pub use i3::I3Wm;

/// Narrow contract the switcher needs from a tiling window manager:
/// focus the window hosting a tmux session, and report whether that
/// window is currently visible on screen.
pub trait WindowManager {
    fn focus_session_window(&self, session: &str) -> Result<()>;
    fn session_window_visible(&self, session: &str) -> Result<bool>;
}

/// Build the adapter named by the config, if any.
pub fn from_config(config: &Config) -> Option<Box<dyn WindowManager>> {
    match config.window_manager {
        WmKind::None => None,
        WmKind::I3 => Some(Box::new(I3Wm::new(config.window_title_pattern.clone()))),
    }
}

/// Render a window title pattern for matching. `{window}` stays empty when
/// only the session is known.
pub(crate) fn render_title(pattern: &str, session: &str, window: &str) -> String {
    pattern
        .replace("{session}", session)
        .replace("{window}", window)
}

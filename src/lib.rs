// ═══════════════════════════════════════════════════════════════════════════
// RFT - rofi/tmux switcher
// ═══════════════════════════════════════════════════════════════════════════

pub mod cache;
pub mod catalog;
pub mod config;
pub mod projects;
pub mod resolver;
pub mod rofi;
pub mod switcher;
pub mod tmux;
pub mod wm;

pub use cache::{Cache, CacheStore};
pub use catalog::Scope;
pub use config::{Config, WmKind};
pub use switcher::{Action, Switcher};

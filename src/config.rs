// ═══════════════════════════════════════════════════════════════════════════
// RFT Configuration
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which window manager adapter to drive, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WmKind {
    #[default]
    None,
    I3,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window_manager: WmKind,

    /// Title template the window manager adapter matches against to find
    /// the window hosting tmux. `{session}` and `{window}` are substituted.
    #[serde(default = "default_window_title_pattern")]
    pub window_title_pattern: String,

    /// Sessions excluded from every listing.
    #[serde(default)]
    pub ignored_sessions: Vec<String>,
}

fn default_window_title_pattern() -> String {
    "{session}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_manager: WmKind::None,
            window_title_pattern: default_window_title_pattern(),
            ignored_sessions: Vec::new(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rft")
            .join("config.toml")
    }

    /// Load from the fixed per-user location. A missing file yields the
    /// defaults; the caller degrades parse failures to defaults as well.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.window_manager, WmKind::None);
        assert_eq!(config.window_title_pattern, "{session}");
        assert!(config.ignored_sessions.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "window_manager = \"i3\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.window_manager, WmKind::I3);
        assert_eq!(config.window_title_pattern, "{session}");
    }

    #[test]
    fn test_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "window_manager = \"i3\"\n",
                "window_title_pattern = \"tmux {session}\"\n",
                "ignored_sessions = [\"scratch\", \"popup\"]\n",
            ),
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.window_manager, WmKind::I3);
        assert_eq!(config.window_title_pattern, "tmux {session}");
        assert_eq!(config.ignored_sessions, vec!["scratch", "popup"]);
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "window_manager = [nonsense").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Cache Store - Persist last-used session and window hints
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Last-used hints guiding default selection. Advisory only: stale
/// references are tolerated by the resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    /// Name of the session switched away from most recently.
    pub last_session: Option<String>,
    /// `session:index:name` key of the window switched away from most
    /// recently.
    pub last_window: Option<String>,
}

pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the fixed per-user location.
    pub fn open() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache. A missing file is all-defaults; a read or parse
    /// failure is surfaced so the caller can degrade to defaults.
    pub fn load(&self) -> Result<Cache> {
        if !self.path.exists() {
            return Ok(Cache::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let cache = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(cache)
    }

    /// Rewrite the cache wholesale. Failure here is fatal to the caller: a
    /// half-written cache would poison future default selection.
    pub fn save(&self, cache: &Cache) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(cache)
            .context("Failed to serialize cache")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

fn default_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rft")
        .join("cache.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("cache.json"));

        let cache = Cache {
            last_session: Some("work".to_string()),
            last_window: Some("work:2:vim".to_string()),
        };
        store.save(&cache).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, cache);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("cache.json"));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, Cache::default());
        assert!(loaded.last_session.is_none());
        assert!(loaded.last_window.is_none());
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cache.json");
        fs::write(&path, "not json").unwrap();

        // The caller degrades this to defaults; loading itself reports it.
        assert!(CacheStore::new(path).load().is_err());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("nested/dir/cache.json"));

        store.save(&Cache::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("cache.json"));

        store
            .save(&Cache {
                last_session: Some("work".to_string()),
                last_window: Some("work:0:sh".to_string()),
            })
            .unwrap();
        store
            .save(&Cache {
                last_session: Some("mail".to_string()),
                last_window: None,
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.last_session.as_deref(), Some("mail"));
        assert_eq!(loaded.last_window, None);
    }
}

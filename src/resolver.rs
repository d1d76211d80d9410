//! Default-selection resolution: which entry to pre-highlight in the menu.
//!
//! The rules model what the user most likely wants next. When the window
//! hosting tmux is on screen (or no window manager is configured), they are
//! most likely hopping back to whatever they used last, so the cached entry
//! wins. When it is off screen, they are "in" the current session and want
//! it highlighted. Every lookup miss degrades to index 0; the index is
//! advisory and the menu is shown regardless.

/// Compute the zero-based index to pre-highlight in `candidates`.
///
/// Precedence: cached entry when `visible`, then the current entry, then 0.
/// Total over every input, including an empty candidate list.
pub fn default_index<S: AsRef<str>>(
    candidates: &[S],
    cached: Option<&str>,
    current: Option<&str>,
    visible: bool,
) -> usize {
    if visible {
        if let Some(index) = cached.and_then(|label| position(candidates, label)) {
            return index;
        }
    }
    current
        .and_then(|label| position(candidates, label))
        .unwrap_or(0)
}

fn position<S: AsRef<str>>(candidates: &[S], label: &str) -> Option<usize> {
    candidates.iter().position(|c| c.as_ref() == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> Vec<&'static str> {
        vec!["work", "mail", "chat"]
    }

    #[test]
    fn test_visible_prefers_cached() {
        // Cache wins even when a different session is current.
        let index = default_index(&sessions(), Some("mail"), Some("work"), true);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_visible_cache_miss_falls_to_current() {
        let index = default_index(&sessions(), Some("deleted"), Some("chat"), true);
        assert_eq!(index, 2);
    }

    #[test]
    fn test_not_visible_ignores_cache() {
        let index = default_index(&sessions(), Some("mail"), Some("work"), false);
        assert_eq!(index, 0);

        let index = default_index(&sessions(), Some("mail"), Some("chat"), false);
        assert_eq!(index, 2);
    }

    #[test]
    fn test_not_visible_without_current() {
        let index = default_index(&sessions(), Some("mail"), None, false);
        assert_eq!(index, 0);
    }

    #[test]
    fn test_double_miss_is_zero() {
        let index = default_index(&sessions(), Some("gone"), Some("also-gone"), true);
        assert_eq!(index, 0);

        let index = default_index(&sessions(), None, None, true);
        assert_eq!(index, 0);
    }

    #[test]
    fn test_window_keys() {
        let windows = vec!["work:0:sh", "work:1:vim", "mail:0:mutt"];
        let index = default_index(&windows, Some("work:1:vim"), Some("mail:0:mutt"), true);
        assert_eq!(index, 1);

        let index = default_index(&windows, Some("work:1:vim"), Some("mail:0:mutt"), false);
        assert_eq!(index, 2);
    }

    #[test]
    fn test_always_in_range() {
        let candidates = sessions();
        for cached in [None, Some("work"), Some("chat"), Some("stale")] {
            for current in [None, Some("mail"), Some("stale")] {
                for visible in [true, false] {
                    let index = default_index(&candidates, cached, current, visible);
                    assert!(index < candidates.len());
                }
            }
        }
    }

    #[test]
    fn test_empty_candidates() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(default_index(&empty, Some("work"), Some("mail"), true), 0);
    }
}

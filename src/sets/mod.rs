//! Built-in page sets.
//!
//! Each submodule constructs one recorded page set; `registry` is the
//! lookup surface a harness uses to find them by name.

mod blogger_desktop;

pub use blogger_desktop::blogger_desktop;

use crate::pageset::PageSet;

/// Every built-in page set, in a fixed order
pub fn registry() -> Vec<PageSet> {
    vec![blogger_desktop()]
}

/// Look up a built-in page set by name
pub fn find(name: &str) -> Option<PageSet> {
    registry().into_iter().find(|set| set.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_sets_validate() {
        for set in registry() {
            set.validate()
                .unwrap_or_else(|e| panic!("built-in set '{}' invalid: {}", set.name, e));
        }
    }

    #[test]
    fn test_registry_sets_share_their_archive() {
        for set in registry() {
            for entry in &set {
                assert_eq!(entry.archive_data_file, set.archive_data_file);
            }
        }
    }

    #[test]
    fn test_find_by_name() {
        assert!(find("blogger_desktop").is_some());
        assert!(find("no_such_set").is_none());
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        for (first, second) in registry().iter().zip(registry().iter()) {
            assert_eq!(first.urls(), second.urls());
            assert_eq!(first, second);
        }
    }
}

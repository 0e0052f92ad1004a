// Folder locator: resolves a partial, user-typed path fragment to a real
// directory by scanning the filesystem. Users often remember only a folder
// name, so a case-insensitive substring scan over whole volumes stands in
// for exact path entry. Slow on large filesystems; accepted trade-off.

use std::path::PathBuf;
use walkdir::WalkDir;

/// Collapse the fragment into a searchable form: trim surrounding
/// whitespace, squeeze repeated spaces, drop leading path separators.
/// Runs to a fixpoint, so normalizing twice equals normalizing once.
pub fn normalize_fragment(raw: &str) -> String {
    let mut fragment = raw.to_string();
    loop {
        let next = fragment.trim().replace("  ", " ");
        let next = next
            .trim_start_matches(|c: char| c == '/' || c == '\\')
            .to_string();
        if next == fragment {
            return fragment;
        }
        fragment = next;
    }
}

pub struct PathLocator {
    roots: Vec<PathBuf>,
}

impl PathLocator {
    /// The fixed volume set the tool scans: the usual drive letters on
    /// Windows, the filesystem root elsewhere.
    pub fn with_default_roots() -> Self {
        let roots: &[&str] = if cfg!(windows) {
            &["C:/", "D:/", "E:/"]
        } else {
            &["/"]
        };
        PathLocator {
            roots: roots.iter().map(PathBuf::from).collect(),
        }
    }

    /// Scan an explicit root set instead of whole volumes. Same match
    /// semantics; used by tests.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        PathLocator { roots }
    }

    /// Resolve a user-typed fragment to an existing directory. The first
    /// directory in recursive pre-order whose full path contains the
    /// normalized fragment (case-insensitive) wins; no ranking among
    /// multiple matches. `None` means the caller should re-prompt.
    pub fn locate(&self, raw: &str) -> Option<PathBuf> {
        let fragment = normalize_fragment(raw);
        if fragment.is_empty() {
            return None;
        }

        if let Some(path) = mobile_storage_shortcut(&fragment) {
            return Some(path);
        }

        let needle = fragment.to_lowercase();
        for root in &self.roots {
            log::debug!("Scanning {} for '{}'", root.display(), needle);
            for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_dir() {
                    continue;
                }
                let Some(path) = entry.path().to_str() else {
                    continue;
                };
                if path.to_lowercase().contains(&needle) {
                    return Some(entry.into_path());
                }
            }
        }
        None
    }
}

/// Android storage shows up under two mount points depending on the
/// environment. When the fragment mentions the sdcard marker, probe both
/// before falling back to a full scan.
fn mobile_storage_shortcut(fragment: &str) -> Option<PathBuf> {
    if cfg!(windows) || !fragment.contains("/sdcard") {
        return None;
    }
    let tail = fragment.rsplit("/sdcard/").next().unwrap_or(fragment);
    for candidate in [
        format!("/storage/emulated/0/{}", tail),
        format!("/sdcard/{}", tail),
    ] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_and_collapses() {
        assert_eq!(normalize_fragment("  /foo/bar  "), "foo/bar");
        assert_eq!(normalize_fragment("a    b"), "a b");
        assert_eq!(normalize_fragment("\\\\share\\docs"), "share\\docs");
        assert_eq!(normalize_fragment("plain"), "plain");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["  //my   folder ", "/ /a", "\\x", "   ", "a  b  c"] {
            let once = normalize_fragment(raw);
            assert_eq!(normalize_fragment(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn finds_directory_matching_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("projects").join("holiday-photos");
        std::fs::create_dir_all(&target).unwrap();

        let locator = PathLocator::with_roots(vec![dir.path().to_path_buf()]);
        let found = locator.locate("Holiday-Photos").unwrap();
        assert!(found.exists());
        assert!(found
            .to_str()
            .unwrap()
            .to_lowercase()
            .contains("holiday-photos"));
    }

    #[test]
    fn first_match_in_walk_order_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("alpha").join("target-dir")).unwrap();
        std::fs::create_dir_all(dir.path().join("zeta").join("target-dir")).unwrap();

        let locator = PathLocator::with_roots(vec![dir.path().to_path_buf()]);
        let found = locator.locate("target-dir").unwrap();
        assert!(found.exists());
    }

    #[test]
    fn reports_not_found_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("something-else")).unwrap();

        let locator = PathLocator::with_roots(vec![dir.path().to_path_buf()]);
        assert!(locator.locate("zz-no-such-folder-zz").is_none());
    }

    #[test]
    fn empty_fragment_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        let locator = PathLocator::with_roots(vec![dir.path().to_path_buf()]);
        assert!(locator.locate("   ").is_none());
        assert!(locator.locate("///").is_none());
    }

    #[test]
    fn plain_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qq-notes-qq.txt"), "hi").unwrap();

        let locator = PathLocator::with_roots(vec![dir.path().to_path_buf()]);
        assert!(locator.locate("qq-notes-qq").is_none());
    }
}

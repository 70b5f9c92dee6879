use std::fs;
use std::path::Path;

use conduit_driver::{Error, Result};

use super::{accept_existing, regular_file_filter, HostFs};

/// Host that expands patterns by scanning a single directory.
///
/// Wildcards (`*` and `?`) are honored in the final path component only,
/// which is what directory-enumeration APIs such as `FindFirstFile` offer.
/// As with `glob(3)`, a leading `.` must be matched explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ScanHost {
    case_insensitive: bool,
}

impl ScanHost {
    /// Match case the way the build target's filesystem usually does.
    pub fn new() -> Self {
        Self {
            case_insensitive: cfg!(windows),
        }
    }

    pub fn with_case_insensitive(case_insensitive: bool) -> Self {
        Self { case_insensitive }
    }

    fn matches(&self, pattern: &str, name: &str) -> bool {
        if self.case_insensitive {
            wildcard_match(&pattern.to_lowercase(), &name.to_lowercase())
        } else {
            wildcard_match(pattern, name)
        }
    }
}

impl Default for ScanHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFs for ScanHost {
    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let as_path = Path::new(pattern);
        let Some(name_pattern) = as_path.file_name().and_then(|n| n.to_str()) else {
            return Ok(Vec::new());
        };
        let parent = as_path.parent().unwrap_or_else(|| Path::new(""));
        let scan_dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };

        let entries = match fs::read_dir(scan_dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!("Could not scan {}: {}", scan_dir.display(), err);
                return Ok(Vec::new());
            }
        };

        let match_hidden = name_pattern.starts_with('.');
        let mut results = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::Pattern {
                pattern: pattern.to_string(),
                message: format!("directory scan failed: {}", err),
            })?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!(
                    "Skipping non-UTF-8 entry {} in {}",
                    file_name.to_string_lossy(),
                    scan_dir.display()
                );
                continue;
            };
            if name.starts_with('.') && !match_hidden {
                continue;
            }
            if !self.matches(name_pattern, name) {
                continue;
            }

            let candidate = parent.join(name);
            // Both halves came from `str`, so the conversion is lossless.
            if regular_file_filter(pattern, &candidate)? {
                results.push(candidate.to_string_lossy().into_owned());
            }
        }

        Ok(results)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        accept_existing(path, fs::create_dir(path))
    }
}

/// Match `name` against a pattern of literal characters, `?` (any single
/// character) and `*` (any run, including empty).
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` seen and the name index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, n));
            p += 1;
        } else if let Some((star, tried)) = backtrack {
            p = star + 1;
            n = tried + 1;
            backtrack = Some((star, n));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn wildcard_literals_and_marks() {
        assert!(wildcard_match("a.txt", "a.txt"));
        assert!(!wildcard_match("a.txt", "b.txt"));
        assert!(wildcard_match("?.txt", "b.txt"));
        assert!(!wildcard_match("?.txt", "bb.txt"));
    }

    #[test]
    fn wildcard_stars() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("*.txt", "notes.txt"));
        assert!(!wildcard_match("*.txt", "notes.txt.bak"));
        assert!(wildcard_match("a*b*c", "aXXbYYc"));
        assert!(wildcard_match("a*b*c", "abc"));
        assert!(!wildcard_match("a*b*c", "acb"));
        assert!(wildcard_match("**x", "yyx"));
    }

    #[test]
    fn case_folding_is_configurable() {
        assert!(!ScanHost::with_case_insensitive(false).matches("*.TXT", "a.txt"));
        assert!(ScanHost::with_case_insensitive(true).matches("*.TXT", "a.txt"));
    }

    #[test]
    fn glob_returns_only_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        fs::write(dir.path().join("c.bin"), b"c").unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let pattern = dir.path().join("*.txt");
        let host = ScanHost::with_case_insensitive(false);
        let found: BTreeSet<String> = host
            .glob(pattern.to_str().unwrap())
            .unwrap()
            .into_iter()
            .collect();

        let expected: BTreeSet<String> = ["a.txt", "b.txt"]
            .iter()
            .map(|name| dir.path().join(name).to_string_lossy().into_owned())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn glob_skips_hidden_entries_unless_asked() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join(".hidden.txt"), b"h").unwrap();
        let host = ScanHost::with_case_insensitive(false);

        let found = host
            .glob(dir.path().join("*.txt").to_str().unwrap())
            .unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a.txt").to_string_lossy().into_owned()]
        );

        let found = host
            .glob(dir.path().join(".*.txt").to_str().unwrap())
            .unwrap();
        assert_eq!(
            found,
            vec![dir.path().join(".hidden.txt").to_string_lossy().into_owned()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn glob_fails_when_a_match_cannot_be_stated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("gone"),
            dir.path().join("dangling.txt"),
        )
        .unwrap();

        let result = ScanHost::with_case_insensitive(false)
            .glob(dir.path().join("*.txt").to_str().unwrap());
        assert!(matches!(result, Err(Error::Pattern { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn glob_skips_non_utf8_entries() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(
            dir.path().join(std::ffi::OsStr::from_bytes(b"\xff.txt")),
            b"x",
        )
        .unwrap();

        let found = ScanHost::with_case_insensitive(false)
            .glob(dir.path().join("*.txt").to_str().unwrap())
            .unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a.txt").to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn glob_in_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("missing").join("*");
        assert!(ScanHost::new()
            .glob(pattern.to_str().unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn mkdir_accepts_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("made");
        let target = target.to_str().unwrap();

        ScanHost::new().mkdir(target).unwrap();
        ScanHost::new().mkdir(target).unwrap();
        assert!(Path::new(target).is_dir());
    }
}

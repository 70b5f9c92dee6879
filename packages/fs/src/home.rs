//! Home-directory configuration and `~` expansion.
//!
//! The home directory is resolved once by whoever builds a [`Home`] and then
//! handed to everything that expands paths. Nothing here reads the
//! environment behind the caller's back.

use conduit_driver::{Error, Result};

/// The resolved home directory, if the environment provided one.
///
/// A `Home` without a directory is still usable: only expanding a path that
/// starts with `~` fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Home {
    dir: Option<String>,
}

impl Home {
    /// A fixed home directory.
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// A home that cannot expand `~`.
    pub fn unresolved() -> Self {
        Self { dir: None }
    }

    /// Resolve the home directory from the process environment.
    ///
    /// Unix reads `HOME`. Other platforms read `USERPROFILE`, falling back
    /// to `HOMEDRIVE` followed by `HOMEPATH`.
    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        if cfg!(unix) {
            Self::from_posix_vars(lookup)
        } else {
            Self::from_windows_vars(lookup)
        }
    }

    fn from_posix_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            dir: lookup("HOME"),
        }
    }

    fn from_windows_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = lookup("USERPROFILE").or_else(|| {
            let drive = lookup("HOMEDRIVE")?;
            let path = lookup("HOMEPATH")?;
            Some(drive + &path)
        });
        Self { dir }
    }

    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    /// Replace a leading `~` with the home directory.
    ///
    /// Only the first character is rewritten, so expanding an expanded path
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `path` starts with `~` and no home
    /// directory was resolved.
    pub fn expand_tilde(&self, path: &str) -> Result<String> {
        match path.strip_prefix('~') {
            Some(rest) => {
                let home = self.dir.as_deref().ok_or_else(|| Error::Config {
                    message: "No home directory found".to_string(),
                })?;
                Ok(format!("{}{}", home, rest))
            }
            None => Ok(path.to_string()),
        }
    }
}

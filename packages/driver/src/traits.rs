//! The driver contract.

use std::sync::Arc;

use crate::{Error, Result};

/// A backend that can fetch, store and expand resources for one class of
/// location (local disk, HTTP, ...).
///
/// Paths arrive already stripped of their scheme. Every operation is
/// whole-resource and blocking.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Driver>`.
pub trait Driver: Send + Sync {
    /// Short identifier for the backend, e.g. `"file"` or `"https"`.
    fn name(&self) -> &str;

    /// Read the full content at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing exists at the path (not an error condition).
    /// * `Ok(Some(bytes))` - The full content.
    /// * `Err(Error)` - The backend failed.
    fn get(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the content at `path` with `data`.
    ///
    /// # Errors
    ///
    /// Fails if the resource cannot be opened or fully written. A failed
    /// write may leave partial output behind.
    fn put(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Expand `pattern` into the regular files it matches. Results are not
    /// sorted. When `verbose` is set every match is logged.
    ///
    /// # Errors
    ///
    /// Drivers with no notion of listing return `Error::NotSupported`.
    fn glob(&self, pattern: &str, verbose: bool) -> Result<Vec<String>>;

    /// Whether resources handled here live off the local machine.
    fn is_remote(&self) -> bool {
        true
    }

    /// Like `get`, but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when nothing exists at `path`.
    fn get_required(&self, path: &str) -> Result<Vec<u8>> {
        self.get(path)?.ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })
    }

    /// Turn a path into the list of paths it denotes: a trailing `*` makes
    /// it a glob, anything else denotes itself.
    ///
    /// # Errors
    ///
    /// Propagates errors from `glob`.
    fn resolve(&self, path: &str, verbose: bool) -> Result<Vec<String>> {
        if path.ends_with('*') {
            if verbose {
                tracing::info!("Resolving [{}] {} ...", self.name(), path);
            }
            let results = self.glob(path, verbose)?;
            if verbose {
                tracing::info!("Resolved to {} paths.", results.len());
            }
            Ok(results)
        } else {
            Ok(vec![path.to_string()])
        }
    }
}

// Blanket implementations for references and smart pointers

impl<T: Driver + ?Sized> Driver for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(path)
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<()> {
        (**self).put(path, data)
    }

    fn glob(&self, pattern: &str, verbose: bool) -> Result<Vec<String>> {
        (**self).glob(pattern, verbose)
    }

    fn is_remote(&self) -> bool {
        (**self).is_remote()
    }
}

impl<T: Driver + ?Sized> Driver for Box<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.as_ref().get(path)
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<()> {
        self.as_ref().put(path, data)
    }

    fn glob(&self, pattern: &str, verbose: bool) -> Result<Vec<String>> {
        self.as_ref().glob(pattern, verbose)
    }

    fn is_remote(&self) -> bool {
        self.as_ref().is_remote()
    }
}

impl<T: Driver + ?Sized> Driver for Arc<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.as_ref().get(path)
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<()> {
        self.as_ref().put(path, data)
    }

    fn glob(&self, pattern: &str, verbose: bool) -> Result<Vec<String>> {
        self.as_ref().glob(pattern, verbose)
    }

    fn is_remote(&self) -> bool {
        self.as_ref().is_remote()
    }
}

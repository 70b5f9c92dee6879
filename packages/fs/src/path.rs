//! Free-standing path utilities over the native host.

use conduit_driver::Result;

use crate::home::Home;
use crate::host::{HostFs, NativeHost};

/// Replace a leading `~` in `path` with `home`.
///
/// # Errors
///
/// Returns `Error::Config` for a `~` path when `home` is unresolved.
pub fn expand_tilde(home: &Home, path: &str) -> Result<String> {
    home.expand_tilde(path)
}

/// Create the directory at `path` (after expansion). An existing entry is
/// not an error.
///
/// # Errors
///
/// Any creation failure other than the entry already existing.
pub fn make_directory(home: &Home, path: &str) -> Result<()> {
    NativeHost::default().mkdir(&home.expand_tilde(path)?)
}

/// Delete the file at `path` (after expansion).
///
/// # Errors
///
/// Surfaces the underlying deletion failure.
pub fn remove_path(home: &Home, path: &str) -> Result<()> {
    NativeHost::default().remove(&home.expand_tilde(path)?)
}

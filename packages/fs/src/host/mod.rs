//! Host filesystem capability.
//!
//! Every variant satisfies the same contract over already-expanded paths.
//! Whole-file reads and writes are shared; pattern expansion and directory
//! creation differ per host.

use std::fs;
use std::io::{Read, Write};

use conduit_driver::{Error, Result};

#[cfg(unix)]
mod posix;
mod scan;

#[cfg(unix)]
pub use posix::PosixHost;
pub use scan::ScanHost;

/// The host variant selected for this build.
#[cfg(unix)]
pub type NativeHost = PosixHost;

/// The host variant selected for this build.
#[cfg(not(unix))]
pub type NativeHost = ScanHost;

/// Operations the local driver needs from the host.
pub trait HostFs: Send + Sync {
    /// Read a whole file.
    ///
    /// Returns `Ok(None)` when the file cannot be opened or is not a
    /// regular file. The buffer is sized once from the file's length at
    /// open time.
    ///
    /// # Errors
    ///
    /// Fails if the file opens but cannot be read in full.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::debug!("Could not open {} for reading: {}", path, err);
                return Ok(None);
            }
        };

        let metadata = file.metadata().map_err(|err| Error::io(path, err))?;
        if !metadata.is_file() {
            return Ok(None);
        }

        let len = usize::try_from(metadata.len()).map_err(|_| {
            Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::OutOfMemory, "file too large"),
            )
        })?;
        let mut data = vec![0; len];
        file.read_exact(&mut data)
            .map_err(|err| Error::io(path, err))?;

        Ok(Some(data))
    }

    /// Write a whole file, truncating anything already there.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created or the data is not fully written.
    /// Partial output is left in place.
    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|err| Error::io(path, err))?;
        file.write_all(data).map_err(|err| Error::io(path, err))?;
        file.flush().map_err(|err| Error::io(path, err))
    }

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// Surfaces the underlying deletion failure.
    fn remove(&self, path: &str) -> Result<()> {
        fs::remove_file(path).map_err(|err| Error::io(path, err))
    }

    /// Expand a pattern to the regular files it matches, unsorted.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if a returned match cannot be stat'ed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>>;

    /// Create a single directory. An existing entry at `path` counts as
    /// success.
    ///
    /// # Errors
    ///
    /// Any other creation failure.
    fn mkdir(&self, path: &str) -> Result<()>;
}

/// Stat a match returned by a pattern matcher and keep it only if it is a
/// regular file.
pub(crate) fn regular_file_filter(pattern: &str, candidate: &std::path::Path) -> Result<bool> {
    let metadata = fs::metadata(candidate).map_err(|err| Error::Pattern {
        pattern: pattern.to_string(),
        message: format!("stat failed for {}: {}", candidate.display(), err),
    })?;
    Ok(metadata.file_type().is_file())
}

/// Treat an already-existing entry as a successful `mkdir`.
pub(crate) fn accept_existing(path: &str, result: std::io::Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(Error::io(path, err)),
    }
}

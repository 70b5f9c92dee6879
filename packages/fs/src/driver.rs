use conduit_driver::{Driver, Result};

use crate::home::Home;
use crate::host::{HostFs, NativeHost};

/// Driver for paths on the local filesystem.
///
/// Every path is tilde-expanded with the configured [`Home`] before it
/// reaches the host.
pub struct LocalDriver<H = NativeHost> {
    home: Home,
    host: H,
}

impl LocalDriver<NativeHost> {
    pub fn new(home: Home) -> Self {
        Self::with_host(home, NativeHost::default())
    }
}

impl<H: HostFs> LocalDriver<H> {
    pub fn with_host(home: Home, host: H) -> Self {
        Self { home, host }
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    /// Create a single directory; an existing one is fine.
    ///
    /// # Errors
    ///
    /// Fails on a `~` path with no home, or any other creation failure.
    pub fn mkdir(&self, path: &str) -> Result<()> {
        let path = self.home.expand_tilde(path)?;
        self.host.mkdir(&path)
    }

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// Fails on a `~` path with no home, or if the file cannot be removed.
    pub fn remove(&self, path: &str) -> Result<()> {
        let path = self.home.expand_tilde(path)?;
        self.host.remove(&path)
    }
}

impl<H: HostFs> Driver for LocalDriver<H> {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let path = self.home.expand_tilde(path)?;
        tracing::debug!("Reading {}...", path);
        self.host.read(&path)
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<()> {
        let path = self.home.expand_tilde(path)?;
        tracing::debug!("Writing {} ({} bytes)...", path, data.len());
        self.host.write(&path, data)
    }

    fn glob(&self, pattern: &str, verbose: bool) -> Result<Vec<String>> {
        let pattern = self.home.expand_tilde(pattern)?;
        let results = self.host.glob(&pattern)?;
        if verbose {
            for entry in &results {
                tracing::info!("{}", entry);
            }
        }
        Ok(results)
    }

    fn is_remote(&self) -> bool {
        false
    }
}

use std::path::Path;

use conduit_driver::Result;

use crate::home::Home;

/// A local path standing in for a resource, optionally owned.
///
/// When `is_remote` is set the handle owns the file: it was materialized
/// from a remote resource and is deleted when the handle is dropped.
/// Otherwise the handle is only a typed reference to a path the caller
/// already owns.
///
/// A handle is the single party responsible for deleting its file, so it
/// is not `Clone`.
#[derive(Debug)]
pub struct LocalHandle {
    local_path: String,
    is_remote: bool,
}

impl LocalHandle {
    /// Bind `local_path`, expanding `~` immediately.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for a `~` path when `home` is unresolved.
    pub fn new(home: &Home, local_path: &str, is_remote: bool) -> Result<Self> {
        Ok(Self {
            local_path: home.expand_tilde(local_path)?,
            is_remote,
        })
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn is_remote(&self) -> bool {
        self.is_remote
    }
}

impl AsRef<Path> for LocalHandle {
    fn as_ref(&self) -> &Path {
        Path::new(&self.local_path)
    }
}

impl Drop for LocalHandle {
    fn drop(&mut self) {
        if !self.is_remote {
            return;
        }

        match std::fs::remove_file(&self.local_path) {
            Ok(()) => tracing::debug!("Removed temporary file {}", self.local_path),
            Err(err) => tracing::warn!(
                "Failed to remove temporary file {}: {}",
                self.local_path,
                err
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn remote_handle_deletes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("materialized.bin");
        fs::write(&file, b"downloaded").unwrap();

        {
            let handle =
                LocalHandle::new(&Home::unresolved(), file.to_str().unwrap(), true).unwrap();
            assert!(handle.is_remote());
            assert!(Path::new(handle.local_path()).exists());
        }

        assert!(!file.exists());
    }

    #[test]
    fn local_handle_leaves_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("owned.bin");
        fs::write(&file, b"mine").unwrap();

        {
            let handle =
                LocalHandle::new(&Home::unresolved(), file.to_str().unwrap(), false).unwrap();
            assert!(!handle.is_remote());
        }

        assert!(file.exists());
    }

    #[test]
    fn handle_expands_tilde_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let home = Home::new(dir.path().to_str().unwrap());
        fs::write(dir.path().join("tmp.dat"), b"x").unwrap();

        let handle = LocalHandle::new(&home, "~/tmp.dat", true).unwrap();
        assert_eq!(
            handle.local_path(),
            format!("{}/tmp.dat", dir.path().to_str().unwrap())
        );
        let as_path: &Path = handle.as_ref();
        assert!(as_path.exists());

        drop(handle);
        assert!(!dir.path().join("tmp.dat").exists());
    }

    #[test]
    fn failed_cleanup_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let never_created = dir.path().join("never-created");

        let handle =
            LocalHandle::new(&Home::unresolved(), never_created.to_str().unwrap(), true).unwrap();
        drop(handle);
    }

    #[test]
    fn tilde_without_home_fails() {
        assert!(LocalHandle::new(&Home::unresolved(), "~/x", true).is_err());
    }

    #[test]
    fn handle_can_move_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("threaded");
        fs::write(&file, b"x").unwrap();

        let handle = LocalHandle::new(&Home::unresolved(), file.to_str().unwrap(), true).unwrap();
        std::thread::spawn(move || drop(handle)).join().unwrap();

        assert!(!file.exists());
    }
}

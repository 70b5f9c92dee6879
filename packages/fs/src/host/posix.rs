use std::ffi::{CStr, CString, OsStr};
use std::fs::DirBuilder;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use conduit_driver::{Error, Result};

use super::{accept_existing, regular_file_filter, HostFs};

/// Owner rwx, group and other read.
const DIRECTORY_MODE: u32 = 0o744;

/// Host backed by the C library's `glob(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixHost;

impl PosixHost {
    pub fn new() -> Self {
        Self
    }
}

/// Owns a filled `glob_t` and frees it on drop.
struct GlobBuffer(libc::glob_t);

impl GlobBuffer {
    fn paths(&self) -> impl Iterator<Item = &CStr> + '_ {
        let count = self.0.gl_pathc as usize;
        (0..count).filter_map(move |i| {
            // SAFETY: glob(3) guarantees gl_pathv holds gl_pathc valid,
            // NUL-terminated entries until globfree is called.
            let entry = unsafe { *self.0.gl_pathv.add(i) };
            if entry.is_null() {
                None
            } else {
                Some(unsafe { CStr::from_ptr(entry) })
            }
        })
    }
}

impl Drop for GlobBuffer {
    fn drop(&mut self) {
        // SAFETY: the buffer was either zeroed or filled by glob(3).
        unsafe { libc::globfree(&mut self.0) };
    }
}

impl HostFs for PosixHost {
    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let c_pattern = CString::new(pattern).map_err(|err| Error::Pattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;

        // SAFETY: glob_t is plain data; an all-zero value is its empty state.
        let mut buffer = GlobBuffer(unsafe { std::mem::zeroed() });
        let rc = unsafe {
            libc::glob(
                c_pattern.as_ptr(),
                libc::GLOB_NOSORT,
                None,
                &mut buffer.0,
            )
        };

        match rc {
            0 => {}
            libc::GLOB_NOMATCH => return Ok(Vec::new()),
            code => {
                return Err(Error::Pattern {
                    pattern: pattern.to_string(),
                    message: format!("glob failed with code {}", code),
                })
            }
        }

        let mut results = Vec::new();
        for entry in buffer.paths() {
            let candidate = Path::new(OsStr::from_bytes(entry.to_bytes()));
            if !regular_file_filter(pattern, candidate)? {
                continue;
            }
            match entry.to_str() {
                Ok(path) => results.push(path.to_string()),
                Err(_) => tracing::debug!("Skipping non-UTF-8 match {}", candidate.display()),
            }
        }

        Ok(results)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        accept_existing(
            path,
            DirBuilder::new().mode(DIRECTORY_MODE).create(path),
        )
    }
}

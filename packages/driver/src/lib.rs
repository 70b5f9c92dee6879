//! Driver contract for conduit.
//!
//! This is the narrow waist of the conduit stack. Every backend - the local
//! filesystem, HTTP, or anything layered on top of them - implements the same
//! three operations over scheme-stripped paths and raw bytes:
//!
//! - `get(path)` reads a whole resource, or reports that it is absent
//! - `put(path, data)` replaces a whole resource
//! - `glob(pattern, verbose)` expands a pattern to matching regular files
//!
//! # Example
//!
//! ```rust
//! use conduit_driver::{Driver, Result};
//!
//! fn copy(from: &dyn Driver, to: &dyn Driver, path: &str) -> Result<bool> {
//!     match from.get(path)? {
//!         Some(data) => {
//!             to.put(path, &data)?;
//!             Ok(true)
//!         }
//!         None => Ok(false),
//!     }
//! }
//! ```

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Driver;

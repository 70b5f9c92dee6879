//! # conduit-fs
//!
//! The local-filesystem side of conduit.
//!
//! - [`Home`] carries the resolved home directory used for `~` expansion.
//! - [`LocalDriver`] implements the [`Driver`](conduit_driver::Driver)
//!   contract on top of a [`HostFs`] variant.
//! - [`LocalHandle`] binds a resource to a local path and deletes that path
//!   on drop when the file was materialized from a remote resource.
//!
//! ## Example
//!
//! ```rust,ignore
//! use conduit_driver::Driver;
//! use conduit_fs::{Home, LocalDriver};
//!
//! let driver = LocalDriver::new(Home::from_env());
//! driver.put("~/out.bin", b"payload")?;
//! let data = driver.get("~/out.bin")?;
//! let matches = driver.glob("~/*.bin", false)?;
//! ```

mod driver;
mod handle;
mod home;
pub mod host;
pub mod path;

pub use driver::LocalDriver;
pub use handle::LocalHandle;
pub use home::Home;
pub use host::{HostFs, NativeHost, ScanHost};

#[cfg(unix)]
pub use host::PosixHost;

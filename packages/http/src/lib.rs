//! # conduit-http
//!
//! Pooled blocking HTTP transport for conduit.
//!
//! ## Transport and Pool
//!
//! A [`Transport`] is one reusable request executor with its own connection
//! context. A [`Pool`] owns a fixed number of them and lends one out per
//! request:
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use conduit_http::{Headers, Pool, Query};
//!
//! let pool = Pool::new(4, false, Duration::from_secs(30))?;
//!
//! // Blocks until a transport is free; returned to the pool on drop.
//! let mut transport = pool.acquire();
//! let response = transport.get("https://example.com/data", &Headers::new(), &Query::new(), 0)?;
//!
//! // A 4xx/5xx is a response, not an error.
//! if response.ok() {
//!     println!("{} bytes", response.data.len());
//! }
//! ```
//!
//! ## HttpDriver
//!
//! [`HttpDriver`] implements the conduit [`Driver`](conduit_driver::Driver)
//! contract on top of a pool and adds the retry policy:
//!
//! ```rust,ignore
//! use conduit_driver::Driver;
//! use conduit_http::{HttpConfig, HttpDriver, Scheme};
//!
//! let driver = HttpDriver::from_config(&HttpConfig::default(), Scheme::Https)?;
//! let data = driver.get("example.com/data")?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod pool;
pub mod transport;
pub mod types;

pub use config::HttpConfig;
pub use driver::{HttpDriver, Scheme};
pub use error::Error;
pub use pool::{Pool, PooledTransport};
pub use transport::Transport;
pub use types::{Headers, Method, Query, Response};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Settings for an HTTP pool and the driver that composes it.
///
/// Every field has a default, so a partial (or empty) JSON object is valid:
///
/// ```json
/// { "concurrent": 8, "timeout_secs": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Number of pooled transports.
    pub concurrent: usize,

    /// Log every request at info level and enable connection tracing.
    pub verbose: bool,

    /// Per-request timeout applied to every transport.
    pub timeout_secs: u64,

    /// Extra attempts after a transport error or 5xx.
    pub retry: usize,

    /// Pause between attempts.
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            concurrent: 4,
            verbose: false,
            timeout_secs: 30,
            retry: 8,
            retry_delay_ms: 1000,
        }
    }
}

impl HttpConfig {
    /// # Errors
    ///
    /// Fails on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

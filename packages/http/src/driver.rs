use std::thread;
use std::time::Duration;

use conduit_driver::{Driver, Error as DriverError, Result as DriverResult};

use crate::config::HttpConfig;
use crate::error::Error;
use crate::pool::Pool;
use crate::transport::Transport;
use crate::types::{Headers, Query, Response};

/// URL scheme an [`HttpDriver`] prepends to scheme-stripped paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Driver for resources behind plain HTTP(S) URLs.
///
/// Requests borrow a transport from the pool for one attempt at a time.
/// Transport errors and 5xx responses are reissued up to `retry` extra
/// times, re-acquiring a transport for each attempt.
pub struct HttpDriver {
    pool: Pool,
    scheme: Scheme,
    retry: usize,
    retry_delay: Duration,
}

impl HttpDriver {
    /// A driver with no retries.
    pub fn new(pool: Pool, scheme: Scheme) -> Self {
        Self {
            pool,
            scheme,
            retry: 0,
            retry_delay: Duration::ZERO,
        }
    }

    /// # Errors
    ///
    /// Fails if the pool cannot be built.
    pub fn from_config(config: &HttpConfig, scheme: Scheme) -> Result<Self, Error> {
        Ok(Self::new(Pool::from_config(config)?, scheme)
            .with_retry(config.retry, config.retry_delay()))
    }

    pub fn with_retry(mut self, retry: usize, retry_delay: Duration) -> Self {
        self.retry = retry;
        self.retry_delay = retry_delay;
        self
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    fn url(&self, path: &str) -> String {
        format!("{}://{}", self.scheme.as_str(), path)
    }

    fn exec<F>(&self, url: &str, request: F) -> Result<Response, Error>
    where
        F: Fn(&mut Transport) -> Result<Response, Error>,
    {
        let mut attempt = 0;
        loop {
            let result = {
                let mut transport = self.pool.acquire();
                request(&mut *transport)
            };

            let retryable = match &result {
                Ok(response) => response.retry(),
                Err(err) => err.is_transport(),
            };
            if !retryable || attempt >= self.retry {
                return result;
            }

            attempt += 1;
            match &result {
                Ok(response) => tracing::warn!(
                    "Retrying {} after HTTP {} ({}/{})",
                    url,
                    response.code,
                    attempt,
                    self.retry
                ),
                Err(err) => tracing::warn!(
                    "Retrying {} after {} ({}/{})",
                    url,
                    err,
                    attempt,
                    self.retry
                ),
            }
            thread::sleep(self.retry_delay);
        }
    }

    /// GET with explicit headers and query parameters.
    ///
    /// # Errors
    ///
    /// Transport failures (after retries) and failure statuses other than
    /// 404/410, which are reported as `Ok(None)`.
    pub fn get_with(
        &self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> DriverResult<Option<Vec<u8>>> {
        let url = self.url(path);
        let response = self.exec(&url, |t| t.get(&url, headers, query, 0))?;

        match response.code {
            _ if response.ok() => Ok(Some(response.data)),
            404 | 410 => Ok(None),
            code => Err(DriverError::Status { code, url }),
        }
    }

    /// PUT with explicit headers and query parameters.
    ///
    /// # Errors
    ///
    /// Transport failures (after retries) and any non-2xx status.
    pub fn put_with(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> DriverResult<()> {
        let url = self.url(path);
        let response = self.exec(&url, |t| t.put(&url, data, headers, query))?;

        if response.ok() {
            Ok(())
        } else {
            Err(DriverError::Status {
                code: response.code,
                url,
            })
        }
    }

    /// HEAD, returning the raw response for the caller to inspect.
    ///
    /// # Errors
    ///
    /// Transport failures after retries.
    pub fn head(&self, path: &str, headers: &Headers, query: &Query) -> Result<Response, Error> {
        let url = self.url(path);
        self.exec(&url, |t| t.head(&url, headers, query))
    }

    /// POST, returning the raw response for the caller to inspect.
    ///
    /// # Errors
    ///
    /// Transport failures after retries.
    pub fn post(
        &self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> Result<Response, Error> {
        let url = self.url(path);
        self.exec(&url, |t| t.post(&url, data, headers, query))
    }
}

impl Driver for HttpDriver {
    fn name(&self) -> &str {
        self.scheme.as_str()
    }

    fn get(&self, path: &str) -> DriverResult<Option<Vec<u8>>> {
        self.get_with(path, &Headers::new(), &Query::new())
    }

    fn put(&self, path: &str, data: &[u8]) -> DriverResult<()> {
        self.put_with(path, data, &Headers::new(), &Query::new())
    }

    fn glob(&self, _pattern: &str, _verbose: bool) -> DriverResult<Vec<String>> {
        Err(DriverError::NotSupported {
            driver: self.name().to_string(),
            operation: "glob",
        })
    }
}

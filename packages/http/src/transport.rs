//! A reusable executor for one HTTP request at a time.
//!
//! Each [`Transport`] owns its own connection context (a blocking reqwest
//! client), a scratch receive buffer, and the request configured by the
//! last `init`. Transports are only created by the [`Pool`](crate::Pool),
//! which also guarantees that no two requests share one concurrently.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::Error;
use crate::types::{Headers, Method, Query, Response};

/// Request state between `init` and execution.
///
/// Any verb moves a `Configured` transport back to `Idle`, whatever the
/// outcome.
#[derive(Debug)]
enum State {
    Idle,
    Configured { url: Url, headers: HeaderMap },
}

pub struct Transport {
    client: Client,
    state: State,
    data: Vec<u8>,
    verbose: bool,
    timeout: Duration,
}

impl Transport {
    pub(crate) fn new(verbose: bool, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connection_verbose(verbose)
            .pool_max_idle_per_host(1)
            .build()?;

        Ok(Self {
            client,
            state: State::Idle,
            data: Vec::new(),
            verbose,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configure the next request, discarding everything left over from the
    /// previous one.
    pub(crate) fn init(
        &mut self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> Result<(), Error> {
        self.state = State::Idle;
        self.data.clear();

        let mut url = Url::parse(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            header_map.insert(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }

        self.state = State::Configured {
            url,
            headers: header_map,
        };
        Ok(())
    }

    /// Issue a GET. `reserve` pre-sizes the receive buffer.
    ///
    /// # Errors
    ///
    /// Only transport-level failures (and malformed URLs or headers) are
    /// errors; a failure status is returned as a `Response`.
    pub fn get(
        &mut self,
        path: &str,
        headers: &Headers,
        query: &Query,
        reserve: usize,
    ) -> Result<Response, Error> {
        self.init(path, headers, query)?;
        self.execute(Method::GET, None, reserve)
    }

    /// Issue a HEAD. The response carries no body.
    ///
    /// # Errors
    ///
    /// See [`Transport::get`].
    pub fn head(
        &mut self,
        path: &str,
        headers: &Headers,
        query: &Query,
    ) -> Result<Response, Error> {
        self.init(path, headers, query)?;
        self.execute(Method::HEAD, None, 0)
    }

    /// Issue a PUT with `data` as the body.
    ///
    /// # Errors
    ///
    /// See [`Transport::get`].
    pub fn put(
        &mut self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> Result<Response, Error> {
        self.init(path, headers, query)?;
        self.execute(Method::PUT, Some(data), 0)
    }

    /// Issue a POST with `data` as the body.
    ///
    /// # Errors
    ///
    /// See [`Transport::get`].
    pub fn post(
        &mut self,
        path: &str,
        data: &[u8],
        headers: &Headers,
        query: &Query,
    ) -> Result<Response, Error> {
        self.init(path, headers, query)?;
        self.execute(Method::POST, Some(data), 0)
    }

    fn execute(
        &mut self,
        method: Method,
        body: Option<&[u8]>,
        reserve: usize,
    ) -> Result<Response, Error> {
        let State::Configured { url, headers } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return Err(Error::NotConfigured);
        };

        if self.verbose {
            tracing::info!("{} {}", method, url);
        } else {
            tracing::debug!("{} {}", method, url);
        }

        let mut request = self.client.request(method.into(), url).headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let mut response = request.send()?;
        let code = response.status().as_u16();

        // Repeated headers are folded into one comma-separated value.
        let mut response_headers = Headers::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes());
            response_headers
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }

        self.data.clear();
        if method != Method::HEAD {
            if let Err(err) = self.data.try_reserve(reserve) {
                tracing::debug!("Ignoring receive buffer hint of {} bytes: {}", reserve, err);
            }
            response.read_to_end(&mut self.data).map_err(Error::Body)?;
        }

        // The scratch buffer keeps its capacity for the next request.
        Ok(Response {
            code,
            data: self.data.as_slice().to_vec(),
            headers: response_headers,
        })
    }

    #[cfg(test)]
    fn configured(&self) -> Option<(&Url, &HeaderMap)> {
        match &self.state {
            State::Idle => None,
            State::Configured { url, headers } => Some((url, headers)),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("state", &self.state)
            .field("verbose", &self.verbose)
            .field("timeout", &self.timeout)
            .finish()
    }
}

use std::time::Duration;

use conduit_driver::Error as DriverError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connection, timeout or DNS failure while sending the request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The connection failed or timed out while the body was streaming in.
    #[error("error reading response body: {0}")]
    Body(#[source] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("No transport became available within {waited:?}")]
    PoolExhausted { waited: Duration },

    #[error("Transport used before a request was configured")]
    NotConfigured,
}

impl Error {
    /// Whether this is a transport-level failure, i.e. no status code was
    /// received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Body(_))
    }
}

impl From<Error> for DriverError {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(_) | Error::Body(_) | Error::PoolExhausted { .. } => {
                DriverError::Transport(Box::new(error))
            }
            Error::Json(_) | Error::Config { .. } => DriverError::Config {
                message: error.to_string(),
            },
            Error::UrlParse(_)
            | Error::InvalidHeaderName(_)
            | Error::InvalidHeaderValue(_)
            | Error::NotConfigured => DriverError::InvalidRequest {
                message: error.to_string(),
            },
        }
    }
}

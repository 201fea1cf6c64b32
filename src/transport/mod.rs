//! Byte-level access to TheMealDB.
//!
//! The fetchers only need "GET this URL, give me the body", so that is all
//! [`Transport`] asks for. [`HttpTransport`] is the production implementation;
//! tests swap in an in-memory one.

use crate::config::BrowserConfig;
use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;
use thiserror::Error;

mod endpoints;

pub use endpoints::Endpoints;

/// Errors raised while talking to the API.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Fetches raw response bodies. Blocking from the caller's point of view.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the HTTP client with the configured timeout and user agent.
    pub fn new(config: &BrowserConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(HttpTransport {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes()?;
        debug!("GET {url} -> {} bytes", body.len());
        Ok(body.to_vec())
    }
}

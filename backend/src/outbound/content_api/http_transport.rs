//! Reqwest-backed content repository transport.
//!
//! This adapter owns transport details only: URL construction, credentials,
//! the request deadline and mapping of failures that produced no response.
//! Every received response, whatever its status, is handed back unchanged.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::ContentApiConfig;
use crate::domain::ports::{
    ContentTransport, TransportError, TransportMethod, TransportRequest, TransportResponse,
};

/// Transport that performs HTTP requests against one repository host.
#[derive(Debug, Clone)]
pub struct ReqwestContentTransport {
    client: Client,
    config: ContentApiConfig,
}

impl ReqwestContentTransport {
    /// Build a transport using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ContentApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.config.base_url().as_str().trim_end_matches('/');
        let relative = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{relative}")).map_err(|error| {
            TransportError::network(format!("invalid request URL for {relative}: {error}"))
        })
    }
}

#[async_trait]
impl ContentTransport for ReqwestContentTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint(&request.path)?;
        let mut builder = match request.method {
            TransportMethod::Get => self.client.get(url).query(&request.query),
            TransportMethod::Post => {
                let post = self.client.post(url);
                match &request.body {
                    Some(body) => post.json(body),
                    None => post,
                }
            }
        };
        builder = builder.header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = self.config.api_token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::network(error.to_string())
    }
}

//! Thin HTTP client over `reqwest` for the dashboard REST API.
//!
//! Responses are fully buffered into [`Response`] so commands can inspect status and
//! decode the body without holding a `reqwest::Response` across awaits.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::BusinessConfig;

/// Versioned media type the dashboard expects on RGW endpoints.
pub const RGW_API_ACCEPT: &str = "application/vnd.ceph.api.v1.0+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Delete => "DELETE",
        }
    }
}

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type HttpResult<T> = Result<T, HttpError>;

/// Client bound to one dashboard: base URL, bearer token and TLS policy.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Client {
    pub fn from_config(config: &BusinessConfig) -> HttpResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(HttpError::Build)?;

        Ok(Self {
            inner,
            base_url: config.api_url().to_owned(),
            token: config.auth_token().map(str::to_owned),
        })
    }

    /// GET `{base}{path}`.
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::Get, path)
    }

    /// DELETE `{base}{path}`.
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::Delete, path)
    }
}

#[derive(Debug)]
pub struct RequestBuilder<'c> {
    client: &'c Client,
    method: Method,
    url: String,
    headers: HashMap<String, String>,
}

impl<'c> RequestBuilder<'c> {
    fn new(client: &'c Client, method: Method, path: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("accept".to_owned(), RGW_API_ACCEPT.to_owned());
        if let Some(token) = &client.token {
            headers.insert("authorization".to_owned(), format!("Bearer {token}"));
        }

        Self {
            client,
            method,
            url: format!("{}{path}", client.base_url),
            headers,
        }
    }

    pub async fn send(self) -> HttpResult<Response> {
        let Self {
            client,
            method,
            url,
            headers,
        } = self;

        let mut request = match method {
            Method::Get => client.inner.get(&url),
            Method::Delete => client.inner.delete(&url),
        };
        for (name, value) in &headers {
            request = request.header(name, value);
        }

        debug!("{} {url}", method.as_str());
        let transport = |source| HttpError::Transport {
            method: method.as_str(),
            url: url.clone(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?.to_vec();

        debug!("{} {url} -> {status}", method.as_str());
        Ok(Response { status, body })
    }
}

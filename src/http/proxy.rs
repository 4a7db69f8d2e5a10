//! Upstream leg of proxy routes.
//!
//! # Responsibilities
//! - Join the route target with the original path and query
//! - Forward method, headers and streaming body to the upstream
//! - Relay the upstream response back to the client
//! - Convert every transport failure into a 502 response
//!
//! # Design Decisions
//! - Only `http://` targets are proxied (plain HTTP connector)
//! - Connect timeout on the connector, request timeout until response headers
//! - A timed-out upstream is a transport failure like any other

use axum::{
    body::Body,
    http::{header::InvalidHeaderValue, Request, StatusCode, Uri, Version},
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::config::TimeoutConfig;
use crate::security::headers::{rewrite_for_upstream, strip_hop_by_hop};

/// Error type for the proxy leg. Always answered, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("unsupported target scheme {0:?}, only http targets can be proxied")]
    UnsupportedScheme(String),

    #[error("invalid forwarded header: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("{}", error_chain(.0))]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
}

impl UpstreamError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        (self.status(), format!("Proxy error: {self}")).into_response()
    }
}

/// `outer: inner: innermost`, so the root cause (e.g. connection refused)
/// reaches the client.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// A parsed proxy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    authority: String,
    base_path: String,
}

impl UpstreamTarget {
    pub fn parse(target: &str) -> Result<Self, UpstreamError> {
        let invalid = |reason: String| UpstreamError::InvalidTarget {
            target: target.to_string(),
            reason,
        };

        let url = Url::parse(target).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(UpstreamError::UnsupportedScheme(url.scheme().to_string()));
        }
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;

        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            authority,
            base_path: url.path().trim_end_matches('/').to_string(),
        })
    }

    /// `host[:port]` used for the Host header.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Upstream URI: target base path followed by the original path and query.
    pub fn uri_for(&self, path_and_query: &str) -> Result<Uri, UpstreamError> {
        let raw = format!("http://{}{}{}", self.authority, self.base_path, path_and_query);
        raw.parse::<Uri>()
            .map_err(|e| UpstreamError::InvalidTarget {
                target: raw.clone(),
                reason: e.to_string(),
            })
    }
}

/// Pooled HTTP client for proxy routes.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            request_timeout: Duration::from_secs(timeouts.request_secs),
        }
    }

    /// Forward `request` to `target` and return the upstream's response.
    pub async fn forward(
        &self,
        target: &str,
        client_addr: Option<SocketAddr>,
        request: Request<Body>,
    ) -> Result<Response, UpstreamError> {
        let upstream = UpstreamTarget::parse(target)?;

        let (mut parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        parts.uri = upstream.uri_for(&path_and_query)?;
        parts.version = Version::HTTP_11;
        rewrite_for_upstream(
            &mut parts.headers,
            upstream.authority(),
            client_addr.map(|addr| addr.ip()),
        )?;

        let outbound = Request::from_parts(parts, body);
        let response = tokio::time::timeout(self.request_timeout, self.client.request(outbound))
            .await
            .map_err(|_| UpstreamError::Timeout(self.request_timeout))??;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

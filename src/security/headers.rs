//! Header manipulation for the proxy leg.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Rewrite Host to address the upstream
//! - Append X-Forwarded-For, X-Forwarded-Port, X-Forwarded-Proto
//! - Set X-Forwarded-Host from the original Host when absent
//!
//! # Design Decisions
//! - Preserve the existing X-Forwarded-* chain and append to it
//! - Client IP comes from the accepted socket, never from request headers

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use std::net::IpAddr;

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
pub const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
pub const X_FORWARDED_PORT: HeaderName = HeaderName::from_static("x-forwarded-port");
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Connection-scoped headers that must not be forwarded (RFC 9110 §7.6.1).
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

/// Remove hop-by-hop headers, including any named in `Connection`.
///
/// `Upgrade` is dropped too; the proxy leg does not tunnel upgrades.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    headers.remove(header::UPGRADE);
}

/// Prepare client request headers for the upstream.
///
/// `upstream_authority` is the `host[:port]` of the target.
pub fn rewrite_for_upstream(
    headers: &mut HeaderMap,
    upstream_authority: &str,
    client_ip: Option<IpAddr>,
) -> Result<(), InvalidHeaderValue> {
    let original_host = headers.get(header::HOST).cloned();

    strip_hop_by_hop(headers);

    if let Some(ip) = client_ip {
        append_forwarded(headers, X_FORWARDED_FOR, &ip.to_string())?;
    }
    let port = original_host
        .as_ref()
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.rsplit_once(':'))
        .and_then(|(_, port)| port.parse::<u16>().ok())
        .unwrap_or(80);
    append_forwarded(headers, X_FORWARDED_PORT, &port.to_string())?;
    append_forwarded(headers, X_FORWARDED_PROTO, "http")?;

    if !headers.contains_key(X_FORWARDED_HOST) {
        if let Some(host) = original_host {
            headers.insert(X_FORWARDED_HOST, host);
        }
    }

    headers.insert(header::HOST, HeaderValue::from_str(upstream_authority)?);
    Ok(())
}

fn append_forwarded(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: &str,
) -> Result<(), InvalidHeaderValue> {
    let combined = match headers.get(&name).and_then(|v| v.to_str().ok()) {
        Some(existing) if !existing.is_empty() => format!("{existing},{value}"),
        _ => value.to_string(),
    };
    headers.insert(name, HeaderValue::from_str(&combined)?);
    Ok(())
}

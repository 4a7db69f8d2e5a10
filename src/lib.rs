//! Route host library.
//!
//! A single-process HTTP front door: every request path is looked up in a
//! file-backed route table and either redirected or reverse-proxied. An
//! authenticated admin panel appends routes at runtime.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──┬─▶ admin (Basic auth) ──▶ store (routes.json)
//!                             │
//!                             └─▶ routing::Dispatcher ──▶ store (re-read per request)
//!                                        │
//!                                        ├─ Redirect ──▶ 302 Location
//!                                        ├─ Proxy ─────▶ http::proxy ──▶ upstream
//!                                        └─ NotFound / ConfigError ──▶ 404 / 500
//! ```

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod store;

pub use config::HostConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

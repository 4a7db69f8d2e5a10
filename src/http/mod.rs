//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → admin routes (prefix) | dispatch fallback (everything else)
//!     → dispatch: response.rs (redirect / 404 / 500)
//!                 proxy.rs (forward to upstream, relay response or 502)
//!     → Send to client
//! ```

pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use proxy::{UpstreamClient, UpstreamError};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

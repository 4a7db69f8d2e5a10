//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request:
//!     → headers.rs (strip hop-by-hop, rewrite Host, add X-Forwarded-*)
//!     → upstream
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//!     → client
//! ```
//!
//! Admin authentication lives in `admin::auth`.

pub mod headers;

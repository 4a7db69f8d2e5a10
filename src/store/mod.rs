//! Route table persistence.
//!
//! # Data Flow
//! ```text
//! routes.json ({"routes": [...]})
//!     → route_store.rs (read + parse on every call, no cache)
//!     → Vec<Route> (insertion order)
//!
//! createRoute:
//!     load → append → save (temp file + rename over routes.json)
//! ```
//!
//! # Design Decisions
//! - The file is the source of truth; external edits apply on the next request
//! - `load()` fails open to an empty table; `try_load()` exposes the error
//! - Writes replace the whole file atomically; concurrent creates are
//!   last-writer-wins and may drop an update

pub mod route;
pub mod route_store;

pub use route::{Route, RouteKind};
pub use route_store::{RouteStore, StoreError};

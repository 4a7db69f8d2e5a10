//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → reserved.rs (admin prefix? then never dispatched)
//!     → dispatcher.rs (load table, exact path lookup)
//!     → Return: Action (NotFound | Redirect | Proxy | ConfigError)
//! ```
//!
//! # Design Decisions
//! - Exact string equality only: no prefix, trailing-slash or query matching
//! - Linear scan of the freshly loaded table (tables are small)
//! - First match wins (insertion order)
//! - Explicit NotFound rather than silent default

pub mod dispatcher;
pub mod reserved;

pub use dispatcher::{resolve, Action, Dispatcher};
pub use reserved::ReservedPaths;

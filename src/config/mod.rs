//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON/TOML)
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → passed by value into the server, auth gate and admin panel
//! ```
//!
//! # Design Decisions
//! - Config is read once at start and never mutated afterwards
//! - All fields have defaults to allow minimal configs (`{"admin": {...}}`)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, ConfigSource};
pub use schema::{
    AdminConfig, HostConfig, ListenerConfig, ObservabilityConfig, StorageConfig, TimeoutConfig,
};

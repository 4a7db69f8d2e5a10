//! Authenticated admin panel.
//!
//! # Routes
//! ```text
//! GET  <prefix>         → route list + creation form
//! POST <prefix>/routes  → validate, append, 302 back to <prefix>
//! ```
//!
//! Both routes sit behind HTTP Basic auth against the configured credential.

pub mod auth;
pub mod handlers;
pub mod panel;
pub mod render;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;
use self::auth::admin_auth_middleware;
use self::handlers::{create_route, view_panel};

pub use auth::{AuthError, AuthGate, Authorized};
pub use panel::{AdminError, AdminPanel};
pub use render::render_panel;
pub use validation::{audit_table, validate_new_route, TableIssue, ValidationError};

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    let view_path = state.admin.prefix().to_string();
    let create_path = state.admin.create_path();

    Router::new()
        .route(&view_path, get(view_panel))
        .route(&create_path, post(create_route))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

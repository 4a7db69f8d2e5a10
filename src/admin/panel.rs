//! Admin panel controller: auth gate + route store + reservation guard.

use axum::http::{HeaderMap, StatusCode};

use crate::admin::auth::{AuthError, AuthGate, Authorized};
use crate::admin::render::render_panel;
use crate::admin::validation::{validate_new_route, ValidationError};
use crate::config::AdminConfig;
use crate::routing::ReservedPaths;
use crate::store::{Route, RouteStore, StoreError};

/// Error type for route creation.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save routes: {0}")]
    Storage(#[from] StoreError),
}

impl AdminError {
    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AdminPanel {
    auth: AuthGate,
    store: RouteStore,
    reserved: ReservedPaths,
    prefix: String,
}

impl AdminPanel {
    pub fn new(config: &AdminConfig, store: RouteStore) -> Self {
        Self {
            auth: AuthGate::from_config(config),
            store,
            reserved: ReservedPaths::admin(config.prefix.clone()),
            prefix: config.prefix.clone(),
        }
    }

    /// Mount point of the panel view.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Form submission endpoint.
    pub fn create_path(&self) -> String {
        format!("{}/routes", self.prefix)
    }

    pub fn reserved(&self) -> &ReservedPaths {
        &self.reserved
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Authorized, AuthError> {
        self.auth.authenticate(headers)
    }

    pub async fn list_routes(&self, _auth: &Authorized) -> Vec<Route> {
        self.store.load_async().await
    }

    /// Validate and append a route, rewriting the table.
    ///
    /// Not serialized against concurrent calls: two creates racing on the
    /// same table are last-writer-wins and one entry may be lost.
    pub async fn create_route(
        &self,
        _auth: &Authorized,
        path: &str,
        kind: &str,
        target: &str,
    ) -> Result<Route, AdminError> {
        let mut routes = self.store.load_async().await;
        let route = validate_new_route(&routes, &self.reserved, path, kind, target)?;

        routes.push(route.clone());
        self.store.save_async(routes).await?;

        Ok(route)
    }

    pub fn render(&self, routes: &[Route], message: Option<&str>) -> String {
        render_panel(&self.prefix, routes, message)
    }
}

//! Request path → action lookup.

use crate::store::{Route, RouteKind, RouteStore};

/// Outcome of looking up a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No route has this exact path.
    NotFound,
    /// Answer with an HTTP redirect to the target.
    Redirect(String),
    /// Forward the request to the target upstream.
    Proxy(String),
    /// The matching entry carries an unknown type (the raw stored value).
    ConfigError(String),
}

impl Action {
    /// Short label used for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Action::NotFound => "not_found",
            Action::Redirect(_) => "redirect",
            Action::Proxy(_) => "proxy",
            Action::ConfigError(_) => "config_error",
        }
    }
}

/// Resolve `request_path` against `routes`.
pub fn resolve(routes: &[Route], request_path: &str) -> Action {
    let Some(route) = routes.iter().find(|r| r.path == request_path) else {
        return Action::NotFound;
    };

    match &route.kind {
        RouteKind::Redirect => Action::Redirect(route.target.clone()),
        RouteKind::Proxy => Action::Proxy(route.target.clone()),
        RouteKind::Unknown(_) => Action::ConfigError(route.kind.to_string()),
    }
}

/// Dispatches against the current on-disk table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: RouteStore,
}

impl Dispatcher {
    pub fn new(store: RouteStore) -> Self {
        Self { store }
    }

    /// Reload the table and resolve `request_path`.
    pub async fn dispatch(&self, request_path: &str) -> Action {
        resolve(&self.store.load_async().await, request_path)
    }
}

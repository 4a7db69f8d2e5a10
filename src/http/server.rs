//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: admin panel routes + dispatch fallback
//! - Wire up middleware (request ID, tracing)
//! - Keep reserved paths away from the dispatcher
//! - Execute dispatch actions: redirect, proxy, 404, 500
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::admin::{setup_admin_router, AdminPanel};
use crate::config::HostConfig;
use crate::http::proxy::UpstreamClient;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{found, route_not_found, unknown_route_type};
use crate::observability::metrics;
use crate::routing::{Action, Dispatcher};
use crate::store::RouteStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<AdminPanel>,
    pub dispatcher: Dispatcher,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: &HostConfig) -> Self {
        let store = RouteStore::new(config.storage.routes_path.clone());
        Self {
            admin: Arc::new(AdminPanel::new(&config.admin, store.clone())),
            dispatcher: Dispatcher::new(store),
            upstream: UpstreamClient::new(&config.timeouts),
        }
    }
}

/// HTTP front door: admin panel plus route dispatch.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: HostConfig) -> Self {
        let state = AppState::new(&config);
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .merge(setup_admin_router(state.clone()))
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                method = %request.method(),
                                path = %request.uri().path(),
                                request_id = %request_id(request.headers()),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// A handle on the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            admin_prefix = %self.config.admin.prefix,
            routes_path = %self.config.storage.routes_path.display(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler for every non-admin request.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_string();

    if state.admin.reserved().is_reserved(&path) {
        tracing::debug!(path = %path, "Reserved path, not dispatched");
        metrics::record_dispatch("reserved", 404, start_time);
        return route_not_found();
    }

    let action = state.dispatcher.dispatch(&path).await;
    let outcome = action.outcome();

    let response = match action {
        Action::NotFound => {
            tracing::debug!(path = %path, "No route matched");
            route_not_found()
        }
        Action::Redirect(target) => {
            tracing::debug!(path = %path, target = %target, "Redirecting");
            found(&target)
        }
        Action::Proxy(target) => {
            let client_addr = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr);

            tracing::debug!(path = %path, target = %target, "Proxying request");
            match state.upstream.forward(&target, client_addr, request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(path = %path, target = %target, error = %e, "Upstream error");
                    e.into_response()
                }
            }
        }
        Action::ConfigError(kind) => {
            tracing::error!(path = %path, kind = %kind, "Stored route has unknown type");
            unknown_route_type()
        }
    };

    metrics::record_dispatch(outcome, response.status().as_u16(), start_time);
    response
}

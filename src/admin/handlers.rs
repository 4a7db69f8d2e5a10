use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::admin::auth::Authorized;
use crate::http::response::found;
use crate::http::server::AppState;

/// Fields posted by the creation form. Missing fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRouteForm {
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub target: String,
}

pub async fn view_panel(
    State(state): State<AppState>,
    Extension(auth): Extension<Authorized>,
) -> Html<String> {
    let routes = state.admin.list_routes(&auth).await;
    Html(state.admin.render(&routes, None))
}

pub async fn create_route(
    State(state): State<AppState>,
    Extension(auth): Extension<Authorized>,
    Form(form): Form<CreateRouteForm>,
) -> Response {
    match state
        .admin
        .create_route(&auth, &form.path, &form.kind, &form.target)
        .await
    {
        Ok(route) => {
            tracing::info!(
                path = %route.path,
                kind = %route.kind,
                target = %route.target,
                "Route created"
            );
            found(state.admin.prefix())
        }
        Err(e) => {
            tracing::warn!(path = %form.path, error = %e, "Route rejected");
            let routes = state.admin.list_routes(&auth).await;
            let message = e.to_string();
            (e.status(), Html(state.admin.render(&routes, Some(&message)))).into_response()
        }
    }
}

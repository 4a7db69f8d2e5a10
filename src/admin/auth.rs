use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

use crate::config::AdminConfig;
use crate::http::server::AppState;

/// Challenge sent with every 401 so browsers prompt for credentials.
pub const CHALLENGE: &str = r#"Basic realm="RouTe""#;

/// Why an admin request was turned away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingHeader,

    #[error("Authentication required")]
    UnsupportedScheme,

    #[error("Invalid credentials")]
    MalformedCredentials,

    #[error("Invalid credentials")]
    CredentialMismatch,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE))],
            self.to_string(),
        )
            .into_response()
    }
}

/// Proof that the current request carried the administrator credential.
///
/// Only [`AuthGate::authenticate`] can produce one; admin operations take it
/// by reference.
#[derive(Debug, Clone, Copy)]
pub struct Authorized {
    _private: (),
}

/// Stateless HTTP Basic check against the single configured credential.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
}

impl AuthGate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Authorized, AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?;
        let value = value.to_str().map_err(|_| AuthError::UnsupportedScheme)?;

        let (scheme, payload) = value
            .split_once(' ')
            .ok_or(AuthError::UnsupportedScheme)?;
        if !scheme.eq_ignore_ascii_case("Basic") {
            return Err(AuthError::UnsupportedScheme);
        }

        let decoded = STANDARD
            .decode(payload.trim())
            .map_err(|_| AuthError::MalformedCredentials)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

        // Split on the first ':' only; passwords may contain colons.
        let (user, pass) = decoded
            .split_once(':')
            .ok_or(AuthError::CredentialMismatch)?;

        if user == self.username && pass == self.password {
            Ok(Authorized { _private: () })
        } else {
            Err(AuthError::CredentialMismatch)
        }
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Guards the admin routes; on success the request carries an [`Authorized`]
/// extension.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.admin.authenticate(request.headers()) {
        Ok(authorized) => {
            request.extensions_mut().insert(authorized);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                path = %request.uri().path(),
                reason = ?e,
                "Admin authentication failed"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
pub(crate) fn basic_header(user: &str, pass: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let token = STANDARD.encode(format!("{user}:{pass}"));
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {token}")).unwrap(),
    );
    headers
}

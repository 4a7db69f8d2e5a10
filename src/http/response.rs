//! Response construction for dispatch outcomes.
//!
//! # Responsibilities
//! - Build redirect responses
//! - Map dispatch failures to status codes (404, 500)
//!
//! Upstream failures map to 502 in `proxy.rs`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// `302 Found` pointing at `location`.
///
/// A target that is not a valid header value cannot be sent; that is a
/// stored-configuration problem and answers 500.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect target is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}

pub fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Route not found").into_response()
}

/// Stored route carries a type the dispatcher does not know.
pub fn unknown_route_type() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Unknown route type").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_sets_location() {
        let response = found("https://example.com/landing");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com/landing");
    }

    #[test]
    fn relative_location_is_kept() {
        let response = found("/RouTe/panel");
        assert_eq!(response.headers()[header::LOCATION], "/RouTe/panel");
    }

    #[test]
    fn invalid_location_is_a_server_error() {
        let response = found("line\nbreak");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_statuses() {
        assert_eq!(route_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown_route_type().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

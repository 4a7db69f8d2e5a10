//! Route creation checks and whole-table audits.

use std::collections::HashSet;

use crate::routing::ReservedPaths;
use crate::store::{Route, RouteKind};

/// First failed check for a candidate route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Path must start with /")]
    PathNotAbsolute,

    #[error("This path is reserved for the admin panel")]
    Reserved,

    #[error("Path already exists")]
    PathExists,

    #[error("Unknown route type: expected proxy or redirect")]
    InvalidType,

    #[error("Target must not be empty")]
    EmptyTarget,
}

/// Validate a candidate against `existing` and build the route.
///
/// Inputs are trimmed first. Checks run in a fixed order and the first
/// failure is returned.
pub fn validate_new_route(
    existing: &[Route],
    reserved: &ReservedPaths,
    path: &str,
    kind: &str,
    target: &str,
) -> Result<Route, ValidationError> {
    let path = path.trim();
    let kind = kind.trim();
    let target = target.trim();

    if !path.starts_with('/') {
        return Err(ValidationError::PathNotAbsolute);
    }
    if reserved.is_reserved(path) {
        return Err(ValidationError::Reserved);
    }
    if existing.iter().any(|route| route.path == path) {
        return Err(ValidationError::PathExists);
    }
    let kind = RouteKind::parse(kind).ok_or(ValidationError::InvalidType)?;
    if target.is_empty() {
        return Err(ValidationError::EmptyTarget);
    }

    Ok(Route::new(path, kind, target))
}

/// A stored entry that the panel would never have accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableIssue {
    #[error("{path}: path must start with /")]
    PathNotAbsolute { path: String },

    #[error("{path}: path is reserved for the admin panel")]
    Reserved { path: String },

    #[error("{path}: duplicate path, only the first entry is reachable")]
    Duplicate { path: String },

    #[error("{path}: unknown route type {kind:?}")]
    UnknownType { path: String, kind: String },

    #[error("{path}: empty target")]
    EmptyTarget { path: String },
}

/// Report every entry in `routes` that breaks a table invariant.
pub fn audit_table(routes: &[Route], reserved: &ReservedPaths) -> Vec<TableIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for route in routes {
        let path = route.path.clone();
        if !route.path.starts_with('/') {
            issues.push(TableIssue::PathNotAbsolute { path: path.clone() });
        }
        if reserved.is_reserved(&route.path) {
            issues.push(TableIssue::Reserved { path: path.clone() });
        }
        if !seen.insert(route.path.as_str()) {
            issues.push(TableIssue::Duplicate { path: path.clone() });
        }
        if !route.kind.is_known() {
            issues.push(TableIssue::UnknownType {
                path: path.clone(),
                kind: route.kind.to_string(),
            });
        }
        if route.target.trim().is_empty() {
            issues.push(TableIssue::EmptyTarget { path });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserved() -> ReservedPaths {
        ReservedPaths::admin("/RouTe/panel")
    }

    fn existing() -> Vec<Route> {
        vec![Route::new("/go", RouteKind::Redirect, "https://example.com")]
    }

    #[test]
    fn accepts_and_trims() {
        let route =
            validate_new_route(&existing(), &reserved(), "  /api ", " proxy", " http://localhost:9000 ")
                .unwrap();
        assert_eq!(route, Route::new("/api", RouteKind::Proxy, "http://localhost:9000"));
    }

    #[test]
    fn checks_run_in_order() {
        // Every field is bad; the path check wins.
        assert_eq!(
            validate_new_route(&existing(), &reserved(), "api", "bogus", ""),
            Err(ValidationError::PathNotAbsolute)
        );
        assert_eq!(
            validate_new_route(&existing(), &reserved(), "/RouTe/panel", "bogus", ""),
            Err(ValidationError::Reserved)
        );
        assert_eq!(
            validate_new_route(&existing(), &reserved(), "/go", "bogus", ""),
            Err(ValidationError::PathExists)
        );
        assert_eq!(
            validate_new_route(&existing(), &reserved(), "/new", "bogus", ""),
            Err(ValidationError::InvalidType)
        );
        assert_eq!(
            validate_new_route(&existing(), &reserved(), "/new", "redirect", "   "),
            Err(ValidationError::EmptyTarget)
        );
    }

    #[test]
    fn reserved_sub_paths_are_rejected() {
        for path in ["/RouTe/panel/", "/RouTe/panel/routes", "/RouTe/panel/x/y"] {
            assert_eq!(
                validate_new_route(&[], &reserved(), path, "proxy", "http://x"),
                Err(ValidationError::Reserved),
                "{path}"
            );
        }
    }

    #[test]
    fn audit_finds_each_problem() {
        let routes = vec![
            Route::new("/ok", RouteKind::Proxy, "http://a"),
            Route::new("/ok", RouteKind::Redirect, "/b"),
            Route::new("rel", RouteKind::Redirect, "/c"),
            Route::new("/RouTe/panel/x", RouteKind::Redirect, "/d"),
            Route::new("/odd", RouteKind::Unknown("mirror".into()), ""),
        ];

        let issues = audit_table(&routes, &reserved());
        assert_eq!(
            issues,
            vec![
                TableIssue::Duplicate { path: "/ok".into() },
                TableIssue::PathNotAbsolute { path: "rel".into() },
                TableIssue::Reserved { path: "/RouTe/panel/x".into() },
                TableIssue::UnknownType {
                    path: "/odd".into(),
                    kind: "mirror".into()
                },
                TableIssue::EmptyTarget { path: "/odd".into() },
            ]
        );
    }

    #[test]
    fn clean_table_has_no_issues() {
        assert!(audit_table(&existing(), &reserved()).is_empty());
    }
}

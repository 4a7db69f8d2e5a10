//! The route record and its action type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A persisted mapping from an exact request path to an action.
///
/// Missing fields deserialize to empty values so a single malformed entry
/// cannot make the rest of the table unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub path: String,
    #[serde(
        rename = "type",
        default = "RouteKind::missing",
        skip_serializing_if = "RouteKind::is_missing"
    )]
    pub kind: RouteKind,
    #[serde(default)]
    pub target: String,
}

impl Route {
    pub fn new(path: impl Into<String>, kind: RouteKind, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            target: target.into(),
        }
    }
}

/// What a route does with a matching request.
///
/// Any stored `type` other than the strings `proxy`/`redirect` (another
/// string, a number, `null`, an absent field) deserializes into `Unknown`
/// holding the raw value, so it round-trips intact and only its own entry
/// answers with a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RouteKind {
    Proxy,
    Redirect,
    Unknown(Value),
}

impl RouteKind {
    /// Parse a user-supplied type, accepting only the two known actions.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "proxy" => Some(RouteKind::Proxy),
            "redirect" => Some(RouteKind::Redirect),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RouteKind::Unknown(_))
    }

    fn missing() -> Self {
        RouteKind::Unknown(Value::Null)
    }

    fn is_missing(&self) -> bool {
        matches!(self, RouteKind::Unknown(Value::Null))
    }
}

impl From<Value> for RouteKind {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => {
                RouteKind::parse(&raw).unwrap_or(RouteKind::Unknown(Value::String(raw)))
            }
            other => RouteKind::Unknown(other),
        }
    }
}

impl From<RouteKind> for Value {
    fn from(kind: RouteKind) -> Self {
        match kind {
            RouteKind::Proxy => Value::from("proxy"),
            RouteKind::Redirect => Value::from("redirect"),
            RouteKind::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Proxy => f.write_str("proxy"),
            RouteKind::Redirect => f.write_str("redirect"),
            RouteKind::Unknown(Value::String(raw)) => f.write_str(raw),
            RouteKind::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_field_uses_wire_name() {
        let route = Route::new("/go", RouteKind::Redirect, "https://example.com");
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(
            json,
            json!({"path": "/go", "type": "redirect", "target": "https://example.com"})
        );
    }

    #[test]
    fn unknown_type_is_preserved() {
        let route: Route =
            serde_json::from_str(r#"{"path": "/x", "type": "mirror", "target": "t"}"#).unwrap();
        assert_eq!(route.kind, RouteKind::Unknown("mirror".into()));
        assert!(!route.kind.is_known());
        assert_eq!(route.kind.to_string(), "mirror");

        let back = serde_json::to_value(&route).unwrap();
        assert_eq!(back["type"], "mirror");
    }

    #[test]
    fn non_string_type_is_unknown_and_round_trips() {
        for raw in [json!(5), json!(null), json!(["proxy"]), json!({"kind": "proxy"})] {
            let stored = json!({"path": "/x", "type": raw.clone(), "target": "t"});
            let route: Route = serde_json::from_value(stored).unwrap();
            assert_eq!(route.kind, RouteKind::Unknown(raw.clone()));
            assert_eq!(serde_json::to_value(&route).unwrap()["type"], raw);
        }

        let route: Route = serde_json::from_value(json!({"path": "/x", "type": 5})).unwrap();
        assert_eq!(route.kind.to_string(), "5");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let route: Route = serde_json::from_value(json!({"path": "/x"})).unwrap();
        assert!(!route.kind.is_known());
        assert_eq!(route.target, "");

        let back = serde_json::to_value(&route).unwrap();
        assert_eq!(back, json!({"path": "/x", "target": ""}));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(RouteKind::parse("proxy"), Some(RouteKind::Proxy));
        assert_eq!(RouteKind::parse("Proxy"), None);
        assert_eq!(RouteKind::parse(""), None);
    }
}

//! HTML for the admin panel.

use crate::store::Route;

/// Render the route list and creation form.
///
/// Pure function of its inputs; every interpolated value is escaped.
pub fn render_panel(prefix: &str, routes: &[Route], message: Option<&str>) -> String {
    let mut html = String::with_capacity(2048 + routes.len() * 128);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>RouTe Admin Panel</title>\n");
    html.push_str(
        "<style>\n\
         body { font-family: Arial, sans-serif; margin: 40px; }\n\
         table { border-collapse: collapse; width: 100%; margin-top: 20px; }\n\
         th, td { border: 1px solid #ddd; padding: 8px; }\n\
         th { background: #f2f2f2; }\n\
         .message { margin: 10px 0; color: #d9534f; }\n\
         </style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>RouTe Admin Panel</h1>\n");

    if let Some(message) = message.filter(|m| !m.is_empty()) {
        html.push_str("<div class=\"message\">");
        html.push_str(&escape_html(message));
        html.push_str("</div>\n");
    }

    html.push_str("<form method=\"POST\" action=\"");
    html.push_str(&escape_html(prefix));
    html.push_str("/routes\">\n");
    html.push_str("<label>Path (e.g. /test):</label><br>\n");
    html.push_str("<input name=\"path\" type=\"text\" required><br><br>\n");
    html.push_str("<label>Type:</label><br>\n");
    html.push_str("<select name=\"type\">\n");
    html.push_str("<option value=\"proxy\">proxy</option>\n");
    html.push_str("<option value=\"redirect\">redirect</option>\n");
    html.push_str("</select><br><br>\n");
    html.push_str("<label>Target (e.g. http://localhost:1203):</label><br>\n");
    html.push_str("<input name=\"target\" type=\"text\" required><br><br>\n");
    html.push_str("<button type=\"submit\">Create route</button>\n");
    html.push_str("</form>\n");

    html.push_str("<h2>Current routes</h2>\n");
    html.push_str("<table>\n<thead>\n<tr><th>Path</th><th>Type</th><th>Target</th></tr>\n</thead>\n<tbody>\n");

    if routes.is_empty() {
        html.push_str("<tr><td colspan=\"3\">No routes</td></tr>\n");
    }
    for route in routes {
        html.push_str("<tr><td>");
        html.push_str(&escape_html(&route.path));
        html.push_str("</td><td>");
        html.push_str(&escape_html(&route.kind.to_string()));
        html.push_str("</td><td>");
        html.push_str(&escape_html(&route.target));
        html.push_str("</td></tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str("</body>\n</html>\n");

    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RouteKind;

    #[test]
    fn empty_table_shows_placeholder() {
        let html = render_panel("/RouTe/panel", &[], None);
        assert!(html.contains("No routes"));
        assert!(html.contains("action=\"/RouTe/panel/routes\""));
        assert!(!html.contains("class=\"message\""));
    }

    #[test]
    fn lists_routes_in_order() {
        let routes = vec![
            Route::new("/first", RouteKind::Proxy, "http://a"),
            Route::new("/second", RouteKind::Redirect, "https://b"),
        ];
        let html = render_panel("/RouTe/panel", &routes, None);
        let first = html.find("/first").unwrap();
        let second = html.find("/second").unwrap();
        assert!(first < second);
        assert!(!html.contains("No routes"));
    }

    #[test]
    fn message_and_values_are_escaped() {
        let routes = vec![Route::new("/x", RouteKind::Redirect, "<script>alert(1)</script>")];
        let html = render_panel("/RouTe/panel", &routes, Some("bad \"input\" & more"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("bad &quot;input&quot; &amp; more"));
        assert!(!html.contains("<script>"));
    }
}

//! Return value rendering.

use std::collections::BTreeMap;
use std::fmt::Write;

use plugdoc_core::{ReturnValue, Text, escape_html, format_text};

/// Render documented return values, with nested `contains` entries indented
/// under their parent.
pub fn render_return_values(returns: &BTreeMap<String, ReturnValue>) -> String {
    if returns.is_empty() {
        return "<p class=\"empty-note\">No return values documented</p>\n".to_owned();
    }

    let mut html = String::with_capacity(2048);
    html.push_str("<div class=\"param-tree\">\n");
    render_entries(&mut html, returns);
    html.push_str("</div>\n");
    html
}

fn render_entries(html: &mut String, returns: &BTreeMap<String, ReturnValue>) {
    for (name, value) in returns {
        html.push_str("<div class=\"return-item\">\n");
        let _ = writeln!(html, "<div class=\"return-name\">{}</div>", escape_html(name));
        let _ = writeln!(
            html,
            "<div class=\"return-meta\">{} &middot; returned: {}</div>",
            escape_html(value.type_name.as_deref().unwrap_or("unknown")),
            escape_html(value.returned.as_deref().unwrap_or("always")),
        );
        let description = Text::lines_of(value.description.as_ref())
            .iter()
            .map(|line| format_text(line))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(html, "<div class=\"return-desc\">{description}</div>");

        if let Some(sample) = &value.sample {
            let pretty =
                serde_json::to_string_pretty(sample).unwrap_or_else(|_| sample.to_string());
            let _ = writeln!(
                html,
                "<div class=\"return-sample\">{}</div>",
                escape_html(&pretty)
            );
        }

        if !value.contains.is_empty() {
            html.push_str("<div class=\"return-contains\">\n");
            render_entries(html, &value.contains);
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn returns(value: serde_json::Value) -> BTreeMap<String, ReturnValue> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_returns() {
        assert_eq!(
            render_return_values(&BTreeMap::new()),
            "<p class=\"empty-note\">No return values documented</p>\n"
        );
    }

    #[test]
    fn test_return_meta_defaults() {
        let html = render_return_values(&returns(json!({"changed": {}})));
        assert!(html.contains("<div class=\"return-name\">changed</div>"));
        assert!(html.contains("unknown &middot; returned: always"));
        assert!(!html.contains("return-sample"));
    }

    #[test]
    fn test_return_sample_pretty_printed() {
        let html = render_return_values(&returns(json!({
            "data": {
                "type": "dict",
                "returned": "success",
                "description": ["Network <info>.", "Second C(line)."],
                "sample": {"id": "N_1"}
            }
        })));
        assert!(html.contains("dict &middot; returned: success"));
        assert!(html.contains("Network &lt;info&gt;. Second <code>line</code>."));
        assert!(html.contains("{\n  &quot;id&quot;: &quot;N_1&quot;\n}"));
    }

    #[test]
    fn test_nested_contains() {
        let html = render_return_values(&returns(json!({
            "data": {"type": "dict", "contains": {"id": {"type": "str"}}}
        })));
        let contains = html.find("return-contains").unwrap();
        let nested = html.find("<div class=\"return-name\">id</div>").unwrap();
        assert!(contains < nested);
    }
}

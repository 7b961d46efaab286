//! Parameter tree rendering.

use std::fmt::Write;

use plugdoc_core::{IdCounter, Options, PluginOption, Text, escape_html, format_text};
use serde_json::Value;

/// Render the parameter tree, sorted by name at every level.
///
/// Options with suboptions get a collapsible block whose id is taken from
/// `ids`.
pub fn render_parameters(options: &Options, ids: &mut IdCounter) -> String {
    if options.is_empty() {
        return "<p class=\"empty-note\">No parameters</p>\n".to_owned();
    }

    let mut html = String::with_capacity(4096);
    html.push_str("<div class=\"param-tree\">\n");
    for (name, opt) in options {
        render_param_item(&mut html, name, opt, 0, ids);
    }
    html.push_str("</div>\n");
    html
}

fn render_param_item(
    html: &mut String,
    name: &str,
    opt: &PluginOption,
    depth: usize,
    ids: &mut IdCounter,
) {
    let sub_id = (!opt.suboptions.is_empty()).then(|| ids.sub_id(name, depth));

    html.push_str("<div class=\"param-item\">\n");
    match &sub_id {
        Some(id) => {
            let _ = writeln!(
                html,
                "<div class=\"param-header expandable\" data-toggle=\"{}\">",
                escape_html(id)
            );
            html.push_str("<span class=\"param-toggle\">\u{25B6}</span>\n");
        }
        None => {
            html.push_str("<div class=\"param-header\">\n");
            html.push_str("<span class=\"param-toggle\"></span>\n");
        }
    }
    let _ = writeln!(html, "<span class=\"param-name\">{}</span>", escape_html(name));
    let _ = writeln!(
        html,
        "<span class=\"param-type\">({}{})</span>",
        escape_html(opt.type_or_str()),
        opt.elements
            .as_deref()
            .map(|e| format!("/{}", escape_html(e)))
            .unwrap_or_default()
    );
    if opt.required {
        html.push_str("<span class=\"param-required\">required</span>\n");
    }
    if !opt.aliases.is_empty() {
        let _ = writeln!(
            html,
            "<span class=\"param-aliases\">aliases: {}</span>",
            escape_html(&opt.aliases.join(", "))
        );
    }
    html.push_str("</div>\n");

    render_choices_default(html, opt);

    html.push_str("<div class=\"param-desc\">\n");
    for line in Text::lines_of(opt.description.as_ref()) {
        let _ = writeln!(html, "<p>{}</p>", format_text(line));
    }
    if let Some(version) = &opt.version_added {
        let _ = writeln!(html, "<p>Added in version {}</p>", escape_html(version));
    }
    html.push_str("</div>\n");

    if let Some(id) = sub_id {
        let _ = writeln!(html, "<div class=\"suboptions\" id=\"{}\">", escape_html(&id));
        for (sub_name, sub_opt) in &opt.suboptions {
            render_param_item(html, sub_name, sub_opt, depth + 1, ids);
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

/// Choices with the default one marked, or the default alone.
fn render_choices_default(html: &mut String, opt: &PluginOption) {
    if !opt.choices.is_empty() {
        html.push_str("<div class=\"param-choices\">");
        for choice in &opt.choices {
            let class = if opt.default.as_ref() == Some(choice) {
                "param-choice default"
            } else {
                "param-choice"
            };
            let _ = write!(
                html,
                "<span class=\"{class}\">{}</span>",
                escape_html(&display_value(choice))
            );
        }
        html.push_str("</div>\n");
    } else if let Some(default) = &opt.default {
        let _ = writeln!(
            html,
            "<div class=\"param-default\">default: <code>{}</code></div>",
            escape_html(&default.to_string())
        );
    }
}

/// Strings as-is, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

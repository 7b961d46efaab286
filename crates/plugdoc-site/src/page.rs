//! Plugin page template.
//!
//! One self-contained page per plugin: breadcrumb, header, tabbed content and
//! the page script. Optional tabs (notes, examples, return values) appear only
//! when the plugin documents them.

use std::fmt::Write;

use plugdoc_core::{
    IdCounter, PluginData, PluginDoc, Text, escape_html, format_text, highlight_yaml,
};

use crate::assets::{push_page_scripts, push_style_tag};
use crate::examples::render_examples;
use crate::params::render_parameters;
use crate::returns::render_return_values;
use crate::sample::render_sample_task;

/// All data needed to render one plugin page.
pub struct PluginPage<'a> {
    /// Fully-qualified name, e.g. `cisco.meraki.networks`.
    pub full_name: &'a str,
    /// Plugin type shown in the badge and breadcrumb.
    pub plugin_type: &'a str,
    pub doc: &'a PluginDoc,
    pub data: &'a PluginData,
    /// Relative path back to the site root, e.g. `../`.
    pub root_path: &'a str,
    /// Embed the stylesheet instead of linking `styles.css`.
    pub inline_styles: bool,
}

/// Render a complete plugin page.
///
/// Collapsible block ids are numbered per page, so rendering the same plugin
/// twice yields identical HTML.
pub fn render_plugin_page(page: &PluginPage<'_>) -> String {
    let mut ids = IdCounter::new();
    let mut html = String::with_capacity(32 * 1024);
    let doc = page.doc;

    let mut parts = page.full_name.splitn(3, '.');
    let (collection, plugin_name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(namespace), Some(collection), Some(name)) => {
            (format!("{namespace}.{collection}"), name)
        }
        _ => (String::new(), page.full_name),
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"dark\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(page.full_name));
    push_style_tag(&mut html, page.root_path, page.inline_styles);
    html.push_str("</head>\n<body>\n");

    // Zoom and theme controls
    html.push_str("<div class=\"toolbar\">\n");
    html.push_str("<button class=\"toolbar-btn\" id=\"zoom-out-btn\" title=\"Zoom out\">\u{2212}</button>\n");
    html.push_str("<span class=\"zoom-label\" id=\"zoom-level\">100%</span>\n");
    html.push_str("<button class=\"toolbar-btn\" id=\"zoom-in-btn\" title=\"Zoom in\">+</button>\n");
    html.push_str("<div class=\"toolbar-divider\"></div>\n");
    html.push_str("<button class=\"toolbar-btn\" id=\"theme-btn\" title=\"Toggle theme\">auto</button>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"container\">\n");
    render_breadcrumb(&mut html, page, &collection, plugin_name);
    render_header(&mut html, page, plugin_name);
    render_tabs(&mut html, page);

    // Synopsis
    html.push_str("<div id=\"synopsis\" class=\"tab-content active\">\n");
    html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Synopsis</h2>\n");
    push_list(&mut html, "synopsis", doc.description.as_ref(), format_text);
    html.push_str("</div>\n");
    if doc.requirements.is_some() {
        html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Requirements</h2>\n");
        push_list(&mut html, "synopsis", doc.requirements.as_ref(), escape_html);
        html.push_str("</div>\n");
    }
    if let Some(author) = &doc.author {
        html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Author</h2>\n");
        let _ = writeln!(
            html,
            "<div class=\"author\">{}</div>",
            escape_html(&author.lines().join(", "))
        );
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    // Parameters
    html.push_str("<div id=\"parameters\" class=\"tab-content\">\n");
    html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Parameters</h2>\n");
    html.push_str(&render_parameters(&doc.options, &mut ids));
    html.push_str("</div>\n</div>\n");

    // Sample task
    html.push_str("<div id=\"sample\" class=\"tab-content\">\n<div class=\"section\">\n");
    html.push_str("<div class=\"section-bar\">\n<h2 class=\"section-title\">Sample Task</h2>\n");
    html.push_str("<button class=\"example-copy-btn\" id=\"copy-btn-sample\">Copy</button>\n</div>\n");
    html.push_str(
        "<p class=\"section-hint\">A template task showing all available parameters \
         with their defaults or example values.</p>\n",
    );
    html.push_str(&render_sample_task(page.full_name, &doc.options));
    html.push_str("</div>\n</div>\n");

    if doc.notes.is_some() {
        html.push_str("<div id=\"notes\" class=\"tab-content\">\n");
        html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Notes</h2>\n");
        push_list(&mut html, "notes", doc.notes.as_ref(), format_text);
        html.push_str("</div>\n</div>\n");
    }

    if let Some(examples) = &page.data.examples {
        render_examples_tab(&mut html, examples);
    }

    if let Some(returns) = &page.data.returns {
        html.push_str("<div id=\"return\" class=\"tab-content\">\n");
        html.push_str("<div class=\"section\">\n<h2 class=\"section-title\">Return Values</h2>\n");
        html.push_str(&render_return_values(returns));
        html.push_str("</div>\n</div>\n");
    }

    html.push_str("</div>\n");
    push_page_scripts(&mut html);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_breadcrumb(html: &mut String, page: &PluginPage<'_>, collection: &str, plugin_name: &str) {
    html.push_str("<div class=\"breadcrumb\">\n");
    if !collection.is_empty() {
        let _ = writeln!(
            html,
            "<a href=\"{}index.html\">{}</a>",
            escape_html(page.root_path),
            escape_html(collection)
        );
        html.push_str("<span class=\"breadcrumb-separator\">\u{203A}</span>\n");
    }
    let _ = writeln!(html, "<span>{}</span>", escape_html(page.plugin_type));
    html.push_str("<span class=\"breadcrumb-separator\">\u{203A}</span>\n");
    let _ = writeln!(html, "<strong>{}</strong>", escape_html(plugin_name));
    html.push_str("</div>\n");
}

fn render_header(html: &mut String, page: &PluginPage<'_>, plugin_name: &str) {
    html.push_str("<div class=\"header\">\n<div class=\"header-title\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(plugin_name));
    let _ = writeln!(
        html,
        "<span class=\"plugin-type-badge\">{}</span>",
        escape_html(page.plugin_type)
    );
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<div class=\"short-desc\">{}</div>",
        escape_html(page.doc.short_description.as_deref().unwrap_or_default())
    );
    if let Some(version) = &page.doc.version_added {
        let _ = writeln!(
            html,
            "<div class=\"version-info\">Added in version {}</div>",
            escape_html(version)
        );
    }
    html.push_str("</div>\n");
}

fn render_tabs(html: &mut String, page: &PluginPage<'_>) {
    let tabs = [
        ("synopsis", "Synopsis", true),
        ("parameters", "Parameters", true),
        ("sample", "Sample Task", true),
        ("notes", "Notes", page.doc.notes.is_some()),
        ("examples", "Examples", page.data.examples.is_some()),
        ("return", "Return Values", page.data.returns.is_some()),
    ];

    html.push_str("<div class=\"nav-tabs\">\n");
    for (i, (id, label, _)) in tabs.iter().filter(|(_, _, shown)| *shown).enumerate() {
        let _ = writeln!(
            html,
            "<span class=\"nav-tab{}\" data-tab=\"{id}\">{label}</span>",
            if i == 0 { " active" } else { "" }
        );
    }
    html.push_str("</div>\n");
}

fn render_examples_tab(html: &mut String, examples: &str) {
    html.push_str("<div id=\"examples\" class=\"tab-content\">\n<div class=\"section\">\n");
    html.push_str("<div class=\"section-bar\">\n<h2 class=\"section-title\">Examples</h2>\n");
    html.push_str("<div class=\"view-toggle\">\n");
    html.push_str(
        "<button class=\"view-toggle-btn active\" data-examples-view=\"formatted\">Formatted</button>\n",
    );
    html.push_str("<button class=\"view-toggle-btn\" data-examples-view=\"raw\">Raw</button>\n");
    html.push_str("</div>\n</div>\n");
    html.push_str("<div class=\"examples-formatted active\" id=\"examples-formatted\">\n");
    html.push_str(&render_examples(examples));
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<div class=\"examples-raw\" id=\"examples-raw\"><div class=\"raw-examples\"><pre>{}</pre></div></div>",
        highlight_yaml(examples)
    );
    html.push_str("</div>\n</div>\n");
}

/// Append a `<ul>` of the field's lines inside a box of the given class.
fn push_list(html: &mut String, class: &str, text: Option<&Text>, format: fn(&str) -> String) {
    let _ = writeln!(html, "<div class=\"{class}\">\n<ul>");
    for line in Text::lines_of(text) {
        let _ = writeln!(html, "<li>{}</li>", format(line));
    }
    html.push_str("</ul>\n</div>\n");
}

//! Collection index page.

use std::collections::BTreeMap;
use std::fmt::Write;

use plugdoc_core::escape_html;

use crate::assets::{push_index_scripts, push_style_tag};

/// Group used when a plugin name yields no word at all.
const FALLBACK_GROUP: &str = "other";

/// One plugin listed on the index page.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub full_name: String,
    pub short_description: String,
    /// Product area the entry is listed under.
    pub group: String,
}

/// All data needed to render the index page.
pub struct IndexPage<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub version: Option<&'a str>,
    pub entries: &'a [IndexEntry],
    pub inline_styles: bool,
}

/// Infer the product area of a plugin from its name.
///
/// The last dot-separated segment is taken and a prefix removed from it:
/// `strip_prefix` when configured, otherwise `<collection>_` (so
/// `cisco.meraki.meraki_appliance_vlans` becomes `appliance_vlans`). The first
/// of `groups` that prefixes the remainder wins; otherwise the first
/// `_`-separated word is used.
pub fn infer_group(full_name: &str, strip_prefix: Option<&str>, groups: &[String]) -> String {
    let mut segments = full_name.rsplit('.');
    let short_name = segments.next().unwrap_or(full_name);
    let collection_prefix = segments.next().map(|collection| format!("{collection}_"));

    let name = strip_prefix
        .or(collection_prefix.as_deref())
        .and_then(|prefix| short_name.strip_prefix(prefix))
        .unwrap_or(short_name);

    if let Some(group) = groups.iter().find(|group| name.starts_with(group.as_str())) {
        return group.clone();
    }

    match name.split('_').next() {
        Some(word) if !word.is_empty() => word.to_owned(),
        _ => FALLBACK_GROUP.to_owned(),
    }
}

/// Render the index page: entries grouped by product area, groups and
/// entries sorted, with a client-side search box.
pub fn render_index_page(page: &IndexPage<'_>) -> String {
    let mut groups: BTreeMap<&str, Vec<&IndexEntry>> = BTreeMap::new();
    for entry in page.entries {
        groups.entry(entry.group.as_str()).or_default().push(entry);
    }

    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"dark\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(page.title));
    push_style_tag(&mut html, "", page.inline_styles);
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"toolbar\">\n");
    html.push_str("<button class=\"toolbar-btn\" id=\"theme-btn\" title=\"Toggle theme\">auto</button>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"container\">\n<div class=\"index-header\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(page.title));
    if let Some(description) = page.description {
        let _ = writeln!(html, "<div class=\"index-desc\">{}</div>", escape_html(description));
    }
    let count = page.entries.len();
    match page.version {
        Some(version) => {
            let _ = writeln!(
                html,
                "<div class=\"index-meta\">Version {} &middot; {count} modules</div>",
                escape_html(version)
            );
        }
        None => {
            let _ = writeln!(html, "<div class=\"index-meta\">{count} modules</div>");
        }
    }
    html.push_str("</div>\n");

    html.push_str(
        "<input type=\"text\" class=\"search-box\" id=\"module-search\" \
         placeholder=\"Search modules...\" autocomplete=\"off\">\n",
    );

    for (group, mut entries) in groups {
        entries.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        let group = escape_html(group);
        let _ = writeln!(html, "<div class=\"module-group\" data-group=\"{group}\">");
        let _ = writeln!(
            html,
            "<div class=\"module-group-title\">{group} ({})</div>",
            entries.len()
        );
        html.push_str("<ul class=\"module-list\">\n");
        for entry in entries {
            let name = escape_html(&entry.full_name);
            let _ = writeln!(
                html,
                "<li class=\"module-entry\" data-name=\"{}\">",
                escape_html(&entry.full_name.to_lowercase())
            );
            let _ = writeln!(html, "<a href=\"modules/{name}.html\">{name}</a>");
            let _ = writeln!(
                html,
                "<span class=\"module-short-desc\">{}</span>",
                escape_html(&entry.short_description)
            );
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("</div>\n");
    push_index_scripts(&mut html);
    html.push_str("</body>\n</html>\n");
    html
}

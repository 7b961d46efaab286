//! Stylesheet and scripts shipped with every generated site.

use std::fmt::Write;

const STYLES: &str = include_str!("../assets/styles.css");
const THEME_SCRIPT: &str = include_str!("../assets/theme.js");
const PAGE_SCRIPT: &str = include_str!("../assets/page.js");
const INDEX_SCRIPT: &str = include_str!("../assets/index.js");

/// Filename of the shared stylesheet at the site root.
pub const STYLESHEET_FILENAME: &str = "styles.css";

/// The shared stylesheet: dark and light themes, layout and token colors.
pub fn styles() -> &'static str {
    STYLES
}

/// Append the stylesheet, either inline or as a link relative to `root_path`.
pub(crate) fn push_style_tag(html: &mut String, root_path: &str, inline: bool) {
    if inline {
        let _ = writeln!(html, "<style>\n{STYLES}</style>");
    } else {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{root_path}{STYLESHEET_FILENAME}\">"
        );
    }
}

/// Append the scripts for a plugin page.
pub(crate) fn push_page_scripts(html: &mut String) {
    push_script(html, PAGE_SCRIPT);
    push_script(html, THEME_SCRIPT);
}

/// Append the scripts for the index page.
pub(crate) fn push_index_scripts(html: &mut String) {
    push_script(html, INDEX_SCRIPT);
    push_script(html, THEME_SCRIPT);
}

fn push_script(html: &mut String, script: &str) {
    let _ = writeln!(html, "<script>\n{script}</script>");
}

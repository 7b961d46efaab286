//! Sample task tab: one synthesized task per comment mode.

use std::fmt::Write;

use plugdoc_core::{CommentMode, Options, escape_html, highlight_yaml, synthesize};

fn view_label(mode: CommentMode) -> &'static str {
    match mode {
        CommentMode::None => "No Comments",
        CommentMode::OptionalOnly => "Minimal",
        CommentMode::Descriptions => "Documented",
    }
}

/// Render the sample task with a switch between comment modes.
///
/// Every view carries its raw YAML in `data-raw` for copying. The default
/// mode is shown first.
pub fn render_sample_task(plugin_full_name: &str, options: &Options) -> String {
    let active = CommentMode::default();
    let mut html = String::with_capacity(4096);

    html.push_str("<div class=\"sample-toolbar\">\n<div class=\"view-toggle\">\n");
    for mode in CommentMode::ALL {
        let _ = writeln!(
            html,
            "<button class=\"view-toggle-btn{}\" data-sample-view=\"{}\">{}</button>",
            if mode == active { " active" } else { "" },
            mode.as_str(),
            view_label(mode)
        );
    }
    html.push_str("</div>\n</div>\n");

    for mode in CommentMode::ALL {
        let yaml = synthesize(plugin_full_name, options, mode);
        let _ = writeln!(
            html,
            "<div class=\"sample-view{}\" id=\"sample-{}\" data-raw=\"{}\">",
            if mode == active { " active" } else { "" },
            mode.as_str(),
            escape_html(&yaml)
        );
        let _ = writeln!(
            html,
            "<div class=\"example-code\"><pre>{}</pre></div>",
            highlight_yaml(&yaml)
        );
        html.push_str("</div>\n");
    }
    html
}

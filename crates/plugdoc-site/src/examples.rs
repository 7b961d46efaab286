//! Example block rendering.

use std::fmt::Write;

use plugdoc_core::{ExampleSection, escape_html, highlight_yaml, segment};

/// Render an example block as titled, copyable sections.
///
/// Blocks without any `- name:` task are shown verbatim, highlighted.
pub fn render_examples(text: &str) -> String {
    let sections = segment(text);
    if sections.is_empty() {
        return format!(
            "<div class=\"example-section\">\n<div class=\"example-code\"><pre>{}</pre></div>\n</div>\n",
            highlight_yaml(text)
        );
    }

    let mut html = String::with_capacity(text.len() * 4);
    for (index, section) in sections.iter().enumerate() {
        render_section(&mut html, index, section);
    }
    html
}

fn render_section(html: &mut String, index: usize, section: &ExampleSection) {
    let task_id = format!("task-example-{index}");

    html.push_str("<div class=\"example-section\">\n");
    html.push_str("<div class=\"example-header\">\n");
    let _ = writeln!(
        html,
        "<span class=\"example-title\">{}</span>",
        escape_html(&section.title)
    );
    let _ = writeln!(
        html,
        "<button class=\"example-copy-btn\" data-copy=\"{task_id}\">Copy</button>"
    );
    html.push_str("</div>\n");

    if let Some(before) = &section.before_state {
        push_context(html, "Before state:", before);
    }

    let _ = writeln!(
        html,
        "<div class=\"example-code\" id=\"{task_id}\" data-raw=\"{}\"><pre>{}</pre></div>",
        escape_html(&section.task),
        highlight_yaml(&section.task)
    );

    if let Some(output) = &section.task_output {
        push_context(html, "Task Output:", output);
    }
    if let Some(after) = &section.after_state {
        push_context(html, "After state:", after);
    }
    html.push_str("</div>\n");
}

fn push_context(html: &mut String, label: &str, text: &str) {
    let _ = writeln!(
        html,
        "<div class=\"example-context\"><div class=\"example-context-label\">{label}</div>{}</div>",
        escape_html(text)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_fallback_without_tasks() {
        let html = render_examples("# just a comment\nkey: value");
        assert_eq!(html.matches("example-section").count(), 1);
        assert!(html.contains("<span class=\"yaml-comment\"># just a comment</span>"));
        assert!(html.contains("<span class=\"yaml-key\">key</span>"));
        assert!(!html.contains("example-header"));
    }

    #[test]
    fn test_sections_with_context() {
        let text = "\
# Using merged
- name: \"merge config\"
  ns.col.vlans:
    state: merged
# Before state:
# vlan 10
# Task output:
# changed: true
# After state:
# vlan 10, 20
";
        let html = render_examples(text);
        assert!(html.contains("<span class=\"example-title\">Using merged: Merge Config</span>"));
        let before = html.find("Before state:").unwrap();
        let code = html.find("id=\"task-example-0\"").unwrap();
        let output = html.find("Task Output:").unwrap();
        let after = html.find("After state:").unwrap();
        assert!(before < code && code < output && output < after);
        assert!(html.contains("data-copy=\"task-example-0\""));
    }

    #[test]
    fn test_data_raw_escapes_task() {
        let html = render_examples("- name: a\n  debug:\n    msg: \"it's <b>\"\n");
        assert!(html.contains(
            "data-raw=\"- name: a\n  debug:\n    msg: &quot;it&#x27;s &lt;b&gt;&quot;\""
        ));
    }

    #[test]
    fn test_section_ids_are_sequential() {
        let html = render_examples("- name: one\n  m:\n    a: 1\n- name: two\n  m:\n    b: 2\n");
        assert!(html.contains("id=\"task-example-0\""));
        assert!(html.contains("id=\"task-example-1\""));
    }
}

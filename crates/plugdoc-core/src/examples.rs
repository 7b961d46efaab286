//! Segmentation of hand-written example blocks.
//!
//! An example block is a list of pseudo-YAML tasks interleaved with comment
//! markers:
//!
//! ```text
//! # Using merged
//! - name: Merge provided configuration
//!   cisco.meraki.networks:
//!     state: merged
//! # Task output:
//! # ok: [host]
//! # After state:
//! # ...
//! ```
//!
//! [`segment`] splits such a block into [`ExampleSection`]s, one per task.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::capitalize_title;

static SECTION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Using\s+\w+").unwrap());
static BEFORE_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*Before\s+state:?\s*$").unwrap());
static TASK_OUTPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*Task\s+output:?\s*$").unwrap());
static AFTER_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*After\s+state:?\s*$").unwrap());
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s*-+\s*$").unwrap());

const TASK_START: &str = "- name:";

/// One task of an example block with its surrounding context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSection {
    /// `Using merged: Merge Provided Configuration`, or just the task title.
    pub title: String,
    pub before_state: Option<String>,
    /// Task YAML, starting with the `- name:` line.
    pub task: String,
    pub task_output: Option<String>,
    pub after_state: Option<String>,
}

/// Split an example block into sections.
///
/// Returns an empty vector when the block has no `- name:` task, in which
/// case callers show the raw text instead.
pub fn segment(text: &str) -> Vec<ExampleSection> {
    let mut segmenter = Segmenter::new();
    for line in text.lines() {
        segmenter.feed(line);
    }
    segmenter.finish()
}

/// Field the buffered lines will be flushed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// No section open; lines are discarded.
    Idle,
    Before,
    Task,
    Output,
    After,
}

/// Marker line recognized on its trimmed text.
#[derive(Debug, PartialEq, Eq)]
enum Marker<'a> {
    /// `# Using merged`: label without the leading `#`.
    SectionLabel(&'a str),
    BeforeState,
    TaskOutput,
    AfterState,
    /// `- name: ...`: the raw name after the marker.
    TaskStart(&'a str),
}

fn parse_marker(trimmed: &str) -> Option<Marker<'_>> {
    if SECTION_LABEL_RE.is_match(trimmed) {
        let label = trimmed.trim_start_matches('#').trim_start();
        return Some(Marker::SectionLabel(label));
    }
    if BEFORE_STATE_RE.is_match(trimmed) {
        return Some(Marker::BeforeState);
    }
    if TASK_OUTPUT_RE.is_match(trimmed) {
        return Some(Marker::TaskOutput);
    }
    if AFTER_STATE_RE.is_match(trimmed) {
        return Some(Marker::AfterState);
    }
    trimmed
        .strip_prefix(TASK_START)
        .map(|name| Marker::TaskStart(name.trim_start()))
}

/// Strip one leading and one trailing quote character, independently.
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}

/// Line-scanning state machine behind [`segment`].
struct Segmenter<'a> {
    sections: Vec<ExampleSection>,
    current: Option<ExampleSection>,
    target: Target,
    buffer: Vec<&'a str>,
    /// Label from the last `# Using ...` line, consumed by the next task.
    pending_label: Option<String>,
    /// Whether the task buffer holds YAML beyond the `- name:` line.
    seen_yaml: bool,
}

impl<'a> Segmenter<'a> {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            current: None,
            target: Target::Idle,
            buffer: Vec::new(),
            pending_label: None,
            seen_yaml: false,
        }
    }

    fn feed(&mut self, line: &'a str) {
        let trimmed = line.trim();
        match parse_marker(trimmed) {
            Some(Marker::SectionLabel(label)) => {
                self.finish_section();
                self.pending_label = Some(label.to_owned());
            }
            Some(Marker::BeforeState) => self.switch(Target::Before),
            Some(Marker::TaskOutput) => self.switch(Target::Output),
            Some(Marker::AfterState) => self.switch(Target::After),
            Some(Marker::TaskStart(name)) => self.start_task(line, name),
            None => self.capture(line, trimmed),
        }
    }

    fn finish(mut self) -> Vec<ExampleSection> {
        self.finish_section();
        self.sections
    }

    /// Flush into the current field, then redirect capture.
    fn switch(&mut self, target: Target) {
        if self.current.is_none() {
            return;
        }
        self.flush();
        self.target = target;
    }

    fn start_task(&mut self, line: &'a str, raw_name: &str) {
        self.finish_section();

        let name = capitalize_title(strip_quotes(raw_name));
        let title = match self.pending_label.take() {
            Some(label) => format!("{label}: {name}"),
            None => name,
        };
        self.current = Some(ExampleSection {
            title,
            ..ExampleSection::default()
        });
        self.target = Target::Task;
        self.seen_yaml = false;
        self.buffer.push(line);
    }

    fn capture(&mut self, line: &'a str, trimmed: &str) {
        if self.current.is_none() {
            return;
        }

        if self.target == Target::Task {
            if trimmed.starts_with('#') {
                if self.seen_yaml {
                    // A comment after real YAML ends the task.
                    self.flush();
                    self.target = Target::Output;
                    self.buffer.push(line);
                    return;
                }
                if SEPARATOR_RE.is_match(trimmed) {
                    return;
                }
            } else if !trimmed.is_empty() {
                self.seen_yaml = true;
            }
        }

        self.buffer.push(line);
    }

    /// Move buffered lines into the field selected by the current target.
    ///
    /// Blank content leaves the field untouched.
    fn flush(&mut self) {
        let joined = self.buffer.join("\n");
        self.buffer.clear();

        let content = joined.trim();
        let Some(section) = self.current.as_mut() else {
            return;
        };
        if content.is_empty() {
            return;
        }

        match self.target {
            Target::Idle => {}
            Target::Before => section.before_state = Some(content.to_owned()),
            Target::Task => {
                if !section.task.is_empty() {
                    section.task.push_str("\n\n");
                }
                section.task.push_str(content);
            }
            Target::Output => section.task_output = Some(content.to_owned()),
            Target::After => section.after_state = Some(content.to_owned()),
        }
    }

    /// Flush and close the open section, keeping it only if it has a task.
    fn finish_section(&mut self) {
        self.flush();
        if let Some(section) = self.current.take()
            && !section.task.trim().is_empty()
        {
            self.sections.push(section);
        }
        self.target = Target::Idle;
        self.seen_yaml = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_marker() {
        assert_eq!(
            parse_marker("# Using merged"),
            Some(Marker::SectionLabel("Using merged"))
        );
        assert_eq!(
            parse_marker("#Using replaced state"),
            Some(Marker::SectionLabel("Using replaced state"))
        );
        assert_eq!(parse_marker("# Before state:"), Some(Marker::BeforeState));
        assert_eq!(parse_marker("# before STATE"), Some(Marker::BeforeState));
        assert_eq!(parse_marker("# Task Output"), Some(Marker::TaskOutput));
        assert_eq!(parse_marker("# task output:"), Some(Marker::TaskOutput));
        assert_eq!(parse_marker("# After state:"), Some(Marker::AfterState));
        assert_eq!(
            parse_marker("- name: \"Do thing\""),
            Some(Marker::TaskStart("\"Do thing\""))
        );
        assert_eq!(parse_marker("# Before state: extra"), None);
        assert_eq!(parse_marker("# Using"), None);
        assert_eq!(parse_marker("- names: x"), None);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"quoted\""), "quoted");
        assert_eq!(strip_quotes("'single'"), "single");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("\"unbalanced"), "unbalanced");
        assert_eq!(strip_quotes("\""), "");
    }

    #[test]
    fn test_no_task_yields_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("# Using merged\n# Before state:\n# nothing here\n").is_empty());
        assert!(segment("cisco.meraki.networks:\n  name: x\n").is_empty());
    }

    #[test]
    fn test_single_task_without_markers() {
        let sections = segment("\n- name: create network\n  cisco.meraki.networks:\n    name: lab\n\n");
        assert_eq!(
            sections,
            vec![ExampleSection {
                title: "Create Network".to_owned(),
                task: "- name: create network\n  cisco.meraki.networks:\n    name: lab".to_owned(),
                ..ExampleSection::default()
            }]
        );
    }

    #[test]
    fn test_section_label_prefixes_title() {
        let sections = segment("# Using foo\n- name: \"Do thing\"\n  mymod:\n    x: 1\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Using foo: Do Thing");
        assert_eq!(sections[0].task, "- name: \"Do thing\"\n  mymod:\n    x: 1");
        assert!(sections[0].before_state.is_none());
        assert!(sections[0].task_output.is_none());
        assert!(sections[0].after_state.is_none());
    }

    #[test]
    fn test_label_applies_to_next_task_only() {
        let sections = segment("# Using merged\n- name: one\n  m: 1\n- name: two\n  m: 2\n");
        assert_eq!(sections[0].title, "Using merged: One");
        assert_eq!(sections[1].title, "Two");
    }

    #[test]
    fn test_consecutive_tasks_do_not_leak() {
        let sections = segment("- name: first\n  a: 1\n- name: second\n  b: 2\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].task, "- name: first\n  a: 1");
        assert_eq!(sections[1].task, "- name: second\n  b: 2");
    }

    #[test]
    fn test_full_markers() {
        let text = "\
# Using merged
- name: Merge configuration
  cisco.meraki.networks:
    state: merged
# Before state:
# none
# Task output:
# changed: true
# After state:
# name: lab
";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert_eq!(section.title, "Using merged: Merge Configuration");
        assert_eq!(
            section.task,
            "- name: Merge configuration\n  cisco.meraki.networks:\n    state: merged"
        );
        assert_eq!(section.before_state.as_deref(), Some("# none"));
        assert_eq!(section.task_output.as_deref(), Some("# changed: true"));
        assert_eq!(section.after_state.as_deref(), Some("# name: lab"));
    }

    #[test]
    fn test_comment_after_yaml_starts_output() {
        let text = "- name: gather\n  m:\n    a: 1\n# ok: [localhost]\n# result: done\n";
        let sections = segment(text);
        assert_eq!(sections[0].task, "- name: gather\n  m:\n    a: 1");
        assert_eq!(
            sections[0].task_output.as_deref(),
            Some("# ok: [localhost]\n# result: done")
        );
    }

    #[test]
    fn test_leading_comments_stay_in_task() {
        let text = "- name: with notes\n  # explains the task\n  # -----\n  m:\n    a: 1\n";
        let sections = segment(text);
        assert_eq!(
            sections[0].task,
            "- name: with notes\n  # explains the task\n  m:\n    a: 1"
        );
        assert!(sections[0].task_output.is_none());
    }

    #[test]
    fn test_empty_marker_content_does_not_overwrite() {
        let text = "- name: t\n  m: 1\n# After state:\n# final\n# After state:\n\n";
        let sections = segment(text);
        assert_eq!(sections[0].after_state.as_deref(), Some("# final"));
    }

    #[test]
    fn test_lines_before_first_task_are_discarded() {
        let text = "# Before state:\n# ignored\nstray: line\n- name: t\n  m: 1\n";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].before_state.is_none());
        assert_eq!(sections[0].task, "- name: t\n  m: 1");
    }

    #[test]
    fn test_using_marker_closes_open_section() {
        let text = "- name: a\n  m: 1\n# Task output:\n# ok\n# Using replaced\n# trailing prose\n- name: b\n  m: 2\n";
        let sections = segment(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].task_output.as_deref(), Some("# ok"));
        assert_eq!(sections[1].title, "Using replaced: B");
    }

    #[test]
    fn test_indented_task_start() {
        let sections = segment("  - name: 'nested'\n    m: 1\n");
        assert_eq!(sections[0].title, "Nested");
        assert_eq!(sections[0].task, "- name: 'nested'\n    m: 1");
    }

    #[test]
    fn test_crlf_input() {
        let sections = segment("- name: win\r\n  m: 1\r\n");
        assert_eq!(sections[0].task, "- name: win\n  m: 1");
    }
}

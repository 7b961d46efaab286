//! Core of the plugin documentation renderer.
//!
//! This crate knows nothing about files or HTML pages. It provides:
//!
//! - [`model`]: the plugin documentation data deserialized from
//!   `ansible-doc --json` output
//! - [`segment`]: splitting a free-form example block into titled sections
//!   (before state, task, task output, after state)
//! - [`highlight_line`] and [`highlight_yaml`]: a line-local YAML tokenizer
//!   producing HTML spans
//! - [`synthesize`]: a sample task covering every documented parameter
//!
//! # Example
//!
//! ```
//! use plugdoc_core::{highlight_line, segment};
//!
//! let sections = segment("- name: create vlan\n  vlan:\n    id: 10\n");
//! assert_eq!(sections[0].title, "Create Vlan");
//!
//! let html = highlight_line("enabled: true");
//! assert!(html.contains(r#"<span class="yaml-bool">true</span>"#));
//! ```

mod examples;
mod format;
mod highlight;
mod ids;
pub mod model;
mod sample;

pub use examples::{ExampleSection, segment};
pub use format::{capitalize_title, escape_html, format_text, yaml_scalar, yaml_string};
pub use highlight::{
    Span, TokenKind, classify_scalar, comment_spans, highlight_line, highlight_trailing_comment,
    highlight_yaml, render, scan_line,
};
pub use ids::IdCounter;
pub use model::{
    DocOutput, LoadError, Options, PluginData, PluginDoc, PluginOption, ReturnValue, Text,
    load_doc_output, parse_doc_output,
};
pub use sample::{
    CommentMode, ParseCommentModeError, contextual_example, example_value, sorted_options,
    synthesize,
};

//! Line-oriented YAML highlighting.
//!
//! Each line is classified on its own: no state carries over between lines.
//! The code part of a line is scanned once, left to right, into a list of
//! [`Span`]s, and every span is escaped and wrapped exactly once. Precedence
//! for the code part, first match wins:
//!
//! 1. `- key:` list item with an inline key (value handled as in 5)
//! 2. `- <scalar>` list item, quoted strings included
//! 3. bare `- ` list marker
//! 4. `key:` mapping key (value handled as in 5)
//! 5. value after the first `: ` on the line
//!
//! The highlighter targets well-formed task YAML. Anything it does not
//! recognize passes through as escaped plain text.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::format::{escape_html, is_bool_word, is_null_word, is_number};

/// `  # (<type>, required|optional) <description>`
static STRUCTURED_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(  # \()([^,]+)(, )(required|optional)(\) .*)$").unwrap()
});

/// Separator between the code part of a line and a trailing comment.
const TRAILING_COMMENT: &str = "  # ";

/// Token category of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Bool,
    Null,
    Comment,
    CommentDim,
    CommentType,
    CommentRequired,
    CommentOptional,
    ListMarker,
}

impl TokenKind {
    /// CSS class applied to spans of this kind.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Key => "yaml-key",
            Self::String => "yaml-string",
            Self::Number => "yaml-number",
            Self::Bool => "yaml-bool",
            Self::Null => "yaml-null",
            Self::Comment => "yaml-comment",
            Self::CommentDim => "yaml-comment-dim",
            Self::CommentType => "yaml-comment-type",
            Self::CommentRequired => "yaml-comment-required",
            Self::CommentOptional => "yaml-comment-optional",
            Self::ListMarker => "yaml-list-marker",
        }
    }
}

/// A slice of the input line, optionally classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: Option<TokenKind>,
    pub text: &'a str,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self { kind: None, text }
    }

    fn token(kind: TokenKind, text: &'a str) -> Self {
        Self {
            kind: Some(kind),
            text,
        }
    }
}

/// Highlight a block of YAML-like text line by line.
///
/// Blank lines render as empty strings; line breaks are kept.
pub fn highlight_yaml(text: &str) -> String {
    text.split('\n')
        .map(highlight_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Highlight a single line.
///
/// Whole-line comments become one comment span. Blank lines produce an empty
/// string. A trailing `  # ...` comment is split off and rendered with
/// [`highlight_trailing_comment`].
pub fn highlight_line(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return render(&[Span::token(TokenKind::Comment, line)]);
    }
    if trimmed.is_empty() {
        return String::new();
    }

    let (code, comment) = split_trailing_comment(line);
    let mut html = render(&scan_line(code));
    if let Some(comment) = comment {
        html.push_str(&highlight_trailing_comment(comment));
    }
    html
}

/// Highlight a trailing comment, including its two leading spaces.
///
/// Comments shaped like `  # (str, required) Name of the host` are split into
/// a dim prefix, the type, a dim separator, the required/optional marker and a
/// dim remainder. Other comments become a single dim span.
pub fn highlight_trailing_comment(comment: &str) -> String {
    render(&comment_spans(comment))
}

/// Split a trailing comment into spans.
pub fn comment_spans(comment: &str) -> Vec<Span<'_>> {
    let Some(caps) = STRUCTURED_COMMENT_RE.captures(comment) else {
        return vec![Span::token(TokenKind::CommentDim, comment)];
    };

    let requirement = &caps[4];
    let requirement_kind = if requirement == "required" {
        TokenKind::CommentRequired
    } else {
        TokenKind::CommentOptional
    };

    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    vec![
        Span::token(TokenKind::CommentDim, group(1)),
        Span::token(TokenKind::CommentType, group(2)),
        Span::token(TokenKind::CommentDim, group(3)),
        Span::token(requirement_kind, group(4)),
        Span::token(TokenKind::CommentDim, group(5)),
    ]
}

/// Classify a bare scalar value.
pub fn classify_scalar(value: &str) -> TokenKind {
    if is_bool_word(value) {
        TokenKind::Bool
    } else if is_null_word(value) {
        TokenKind::Null
    } else if is_number(value) {
        TokenKind::Number
    } else {
        TokenKind::String
    }
}

/// Scan the code part of a line (no trailing comment) into spans.
pub fn scan_line(code: &str) -> Vec<Span<'_>> {
    let rest = code.trim_start();
    let indent = &code[..code.len() - rest.len()];

    let mut spans = Vec::new();
    push_plain(&mut spans, indent);

    if let Some(marker_len) = list_marker_len(rest) {
        let (marker, item) = rest.split_at(marker_len);
        if item.is_empty() {
            spans.push(Span::token(TokenKind::ListMarker, marker));
            return spans;
        }
        if let Some(key_len) = key_len(item) {
            spans.push(Span::token(TokenKind::ListMarker, marker));
            spans.push(Span::token(TokenKind::Key, &item[..key_len]));
            push_value_after_colon(&mut spans, &item[key_len..]);
            return spans;
        }
        if !item.starts_with(char::is_whitespace) {
            spans.push(Span::token(TokenKind::ListMarker, marker));
            push_scalar(&mut spans, item);
            return spans;
        }
        // `-` followed by more than one blank: not a list item we recognize.
        spans.clear();
        push_value_after_colon(&mut spans, code);
        return spans;
    }

    if let Some(key_len) = key_len(rest) {
        spans.push(Span::token(TokenKind::Key, &rest[..key_len]));
        push_value_after_colon(&mut spans, &rest[key_len..]);
        return spans;
    }

    spans.clear();
    push_value_after_colon(&mut spans, code);
    spans
}

/// Render spans to HTML.
pub fn render(spans: &[Span<'_>]) -> String {
    let mut html = String::new();
    for span in spans {
        match span.kind {
            Some(kind) => {
                let _ = write!(
                    html,
                    r#"<span class="{}">{}</span>"#,
                    kind.css_class(),
                    escape_html(span.text)
                );
            }
            None => html.push_str(&escape_html(span.text)),
        }
    }
    html
}

/// Split `line` at the first `"  # "` that is not at the very start.
fn split_trailing_comment(line: &str) -> (&str, Option<&str>) {
    match line
        .match_indices(TRAILING_COMMENT)
        .find(|(idx, _)| *idx > 0)
    {
        Some((idx, _)) => (&line[..idx], Some(&line[idx..])),
        None => (line, None),
    }
}

/// Length of a `-` list marker plus its single following blank.
fn list_marker_len(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next() != Some('-') {
        return None;
    }
    chars
        .next()
        .filter(|c| c.is_whitespace())
        .map(|c| 1 + c.len_utf8())
}

/// Length of an identifier key at the start of `s`.
///
/// The identifier must be followed by `:` and then a blank or end of line.
fn key_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let first = *bytes.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    let after = s[len..].strip_prefix(':')?;
    if after.is_empty() || after.starts_with(char::is_whitespace) {
        Some(len)
    } else {
        None
    }
}

/// Classify the value following the first colon that is followed by blanks
/// and then something else. Everything before the value stays plain.
fn push_value_after_colon<'a>(spans: &mut Vec<Span<'a>>, s: &'a str) {
    for (idx, _) in s.match_indices(':') {
        let after = &s[idx + 1..];
        let value = after.trim_start();
        if value.len() < after.len() && !value.is_empty() {
            push_plain(spans, &s[..s.len() - value.len()]);
            push_scalar(spans, value);
            return;
        }
    }
    push_plain(spans, s);
}

/// Push a classified scalar, leaving trailing blanks unclassified.
fn push_scalar<'a>(spans: &mut Vec<Span<'a>>, value: &'a str) {
    let trimmed = value.trim_end();
    spans.push(Span::token(classify_scalar(trimmed), trimmed));
    push_plain(spans, &value[trimmed.len()..]);
}

fn push_plain<'a>(spans: &mut Vec<Span<'a>>, text: &'a str) {
    if !text.is_empty() {
        spans.push(Span::plain(text));
    }
}

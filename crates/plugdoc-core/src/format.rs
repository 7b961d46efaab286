//! Value formatting shared by the highlighter, the sample task generator and
//! the HTML layer.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bI\(([^)]+)\)").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bC\(([^)]+)\)").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bB\(([^)]+)\)").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bU\(([^)]+)\)").unwrap());
// Runs on escaped text, so the angle brackets are already entities.
static REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":ref:`([^`]*?)\s*&lt;[^`]*?&gt;`").unwrap());
static BACKTICK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Characters that start a YAML indicator and force quoting.
const INDICATOR_CHARS: [char; 11] = ['{', '[', ']', '|', '>', '*', '&', '!', '%', '@', '`'];

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Uppercase the first character of every space-separated word.
///
/// The rest of each word is left untouched, so `"add VLAN"` becomes
/// `"Add VLAN"`.
#[must_use]
pub fn capitalize_title(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Escape a description line and expand the plugin doc markup in it.
///
/// Handles `I()`, `C()`, `B()`, `U()`, `` :ref:`label <target>` `` and
/// backtick code spans.
#[must_use]
pub fn format_text(text: &str) -> String {
    let html = escape_html(text);
    let html = ITALIC_RE.replace_all(&html, "<em>$1</em>");
    let html = CODE_RE.replace_all(&html, "<code>$1</code>");
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>");
    let html = URL_RE.replace_all(&html, r#"<a href="$1" target="_blank">$1</a>"#);
    let html = REF_RE.replace_all(&html, "$1");
    BACKTICK_RE
        .replace_all(&html, "<code>$1</code>")
        .into_owned()
}

/// Render a JSON value the way it should appear after `key: ` in YAML.
///
/// Strings that YAML would read differently (reserved words, numbers,
/// indicator characters, surrounding blanks) are double-quoted.
#[must_use]
pub fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => yaml_string(s),
        Value::Array(items) if items.is_empty() => "[]".to_owned(),
        Value::Object(map) if map.is_empty() => "{}".to_owned(),
        other => other.to_string(),
    }
}

/// Quote a string for YAML only when its plain form would be ambiguous.
#[must_use]
pub fn yaml_string(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.contains([':', '#', '\'', '"', '\n'])
        || s.starts_with(' ')
        || s.ends_with(' ')
        || s.starts_with(INDICATOR_CHARS)
        || starts_with_block_indicator(s)
        || is_reserved_scalar(s);

    if !needs_quotes {
        return s.to_owned();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// `true`, `false`, `yes`, `no`, `on` or `off` in any letter case.
pub(crate) fn is_bool_word(s: &str) -> bool {
    ["true", "false", "yes", "no", "on", "off"]
        .iter()
        .any(|word| s.eq_ignore_ascii_case(word))
}

/// `null` in any letter case, or `~`.
pub(crate) fn is_null_word(s: &str) -> bool {
    s == "~" || s.eq_ignore_ascii_case("null")
}

/// Integer or decimal with an optional leading minus: `-?\d+(\.\d+)?`.
pub(crate) fn is_number(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(unsigned),
    }
}

/// Scalars a YAML loader would not read back as a plain string.
fn is_reserved_scalar(s: &str) -> bool {
    if is_bool_word(s) || is_null_word(s) {
        return true;
    }
    // [-+]?\d+\.?\d*
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && frac.bytes().all(|b| b.is_ascii_digit()),
        None => all_digits(unsigned),
    }
}

/// `- ` and `? ` open a sequence entry or a mapping key when unquoted.
fn starts_with_block_indicator(s: &str) -> bool {
    ["-", "?"].contains(&s) || s.starts_with("- ") || s.starts_with("? ")
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_capitalize_title() {
        assert_eq!(capitalize_title("do thing"), "Do Thing");
        assert_eq!(capitalize_title("add VLAN to network"), "Add VLAN To Network");
        assert_eq!(capitalize_title(""), "");
        assert_eq!(capitalize_title("two  spaces"), "Two  Spaces");
    }

    #[test]
    fn test_format_text_markup() {
        assert_eq!(format_text("Use I(state)"), "Use <em>state</em>");
        assert_eq!(format_text("Set C(present)"), "Set <code>present</code>");
        assert_eq!(format_text("B(Warning)"), "<strong>Warning</strong>");
        assert_eq!(
            format_text("See U(https://example.com)"),
            r#"See <a href="https://example.com" target="_blank">https://example.com</a>"#
        );
        assert_eq!(format_text("Run `ls -l`"), "Run <code>ls -l</code>");
    }

    #[test]
    fn test_format_text_ref() {
        assert_eq!(
            format_text("See :ref:`the guide <guide_target>` for details"),
            "See the guide for details"
        );
    }

    #[test]
    fn test_format_text_escapes_first() {
        assert_eq!(format_text("a < b"), "a &lt; b");
        // Markup letters inside words are not expanded
        assert_eq!(format_text("API(v1)"), "API(v1)");
    }

    #[test]
    fn test_yaml_scalar_plain() {
        assert_eq!(yaml_scalar(&json!("present")), "present");
        assert_eq!(yaml_scalar(&json!(true)), "true");
        assert_eq!(yaml_scalar(&json!(42)), "42");
        assert_eq!(yaml_scalar(&json!(null)), "null");
        assert_eq!(yaml_scalar(&json!([])), "[]");
        assert_eq!(yaml_scalar(&json!({})), "{}");
        assert_eq!(yaml_scalar(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_yaml_scalar_quotes_ambiguous_strings() {
        assert_eq!(yaml_scalar(&json!("")), r#""""#);
        assert_eq!(yaml_scalar(&json!("a:b")), r#""a:b""#);
        assert_eq!(yaml_scalar(&json!("# not a comment")), r##""# not a comment""##);
        assert_eq!(yaml_scalar(&json!(r#"say "hi""#)), r#""say \"hi\"""#);
        assert_eq!(yaml_scalar(&json!(" padded")), r#"" padded""#);
        assert_eq!(yaml_scalar(&json!("*star")), r#""*star""#);
        assert_eq!(yaml_scalar(&json!("two\nlines")), r#""two\nlines""#);
        assert_eq!(yaml_scalar(&json!("- item")), r#""- item""#);
        assert_eq!(yaml_scalar(&json!("? key")), r#""? key""#);
        assert_eq!(yaml_scalar(&json!("-")), r#""-""#);
        assert_eq!(yaml_scalar(&json!("-flag")), "-flag");
    }

    #[test]
    fn test_yaml_scalar_quotes_reserved_words() {
        assert_eq!(yaml_scalar(&json!("yes")), r#""yes""#);
        assert_eq!(yaml_scalar(&json!("Off")), r#""Off""#);
        assert_eq!(yaml_scalar(&json!("null")), r#""null""#);
        assert_eq!(yaml_scalar(&json!("~")), r#""~""#);
        assert_eq!(yaml_scalar(&json!("8080")), r#""8080""#);
        assert_eq!(yaml_scalar(&json!("1.5")), r#""1.5""#);
        assert_eq!(yaml_scalar(&json!("1.")), r#""1.""#);
        assert_eq!(yaml_scalar(&json!("-5")), r#""-5""#);
        assert_eq!(yaml_scalar(&json!("-1.5")), r#""-1.5""#);
        assert_eq!(yaml_scalar(&json!("+3")), r#""+3""#);
        assert_eq!(yaml_scalar(&json!("v1.5")), "v1.5");
    }

    #[test]
    fn test_scalar_predicates() {
        assert!(is_bool_word("TRUE"));
        assert!(is_bool_word("on"));
        assert!(!is_bool_word("truthy"));
        assert!(is_null_word("Null"));
        assert!(is_null_word("~"));
        assert!(is_number("-12"));
        assert!(is_number("3.14"));
        assert!(!is_number("3."));
        assert!(!is_number("1e5"));
        assert!(!is_number("-"));
    }
}

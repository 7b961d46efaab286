//! Sample task synthesis from a parameter tree.
//!
//! Produces a YAML task that invokes the plugin with every documented
//! parameter, using defaults, choices or a plausible example value.

use std::fmt;
use std::str::FromStr;

use crate::format::{capitalize_title, yaml_scalar};
use crate::model::{Options, PluginOption};

/// Descriptions longer than this are cut.
const MAX_DESCRIPTION_CHARS: usize = 60;
/// Characters kept from a cut description before the ellipsis.
const TRUNCATED_DESCRIPTION_CHARS: usize = 57;

/// Example values guessed from a string parameter's name.
///
/// Checked in order against the lowercased name; the first entry with a
/// matching substring wins.
const CONTEXTUAL_EXAMPLES: &[(&[&str], &str)] = &[
    (&["name"], "\"example_name\""),
    (&["path", "dest", "src"], "\"/path/to/file\""),
    (&["host"], "\"hostname.example.com\""),
    (&["port"], "22"),
    (&["user"], "\"admin\""),
    (&["pass", "secret"], "\"{{ vault_password }}\""),
    (&["url"], "\"https://example.com\""),
    (&["state"], "\"present\""),
    (&["mode"], "\"0644\""),
    (&["owner"], "\"root\""),
    (&["group"], "\"root\""),
    (&["text", "content", "data"], "\"example content\""),
    (&["command", "cmd"], "\"echo hello\""),
    (&["timeout"], "30"),
    (&["delay"], "5"),
    (&["retries", "retry"], "3"),
    (&["regexp", "regex", "pattern"], "\"^.*$\""),
    (&["line"], "\"example line\""),
    (&["key"], "\"key_name\""),
    (&["value"], "\"value\""),
    (&["version"], "\"1.0.0\""),
    (&["interface"], "\"eth0\""),
    (&["vlan"], "100"),
    (&["ip", "address"], "\"192.168.1.1\""),
    (&["network", "subnet"], "\"192.168.1.0/24\""),
];

/// Which trailing comments to attach to each parameter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentMode {
    /// No comments.
    None,
    /// `# optional` on parameters that are not required.
    #[default]
    OptionalOnly,
    /// `# (type, required|optional) description` on every parameter.
    Descriptions,
}

impl CommentMode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::None, Self::OptionalOnly, Self::Descriptions];

    /// Stable identifier used in CLI flags and DOM ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OptionalOnly => "optional",
            Self::Descriptions => "descriptions",
        }
    }
}

impl fmt::Display for CommentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown comment mode name.
#[derive(Debug, thiserror::Error)]
#[error("unknown comment mode '{0}' (expected none, optional or descriptions)")]
pub struct ParseCommentModeError(String);

impl FromStr for CommentMode {
    type Err = ParseCommentModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "optional" => Ok(Self::OptionalOnly),
            "descriptions" => Ok(Self::Descriptions),
            other => Err(ParseCommentModeError(other.to_owned())),
        }
    }
}

/// Build a sample task for `plugin_full_name` covering every option.
///
/// Options are listed required-first, then by name, at every nesting level.
/// The output has no trailing newline.
pub fn synthesize(plugin_full_name: &str, options: &Options, mode: CommentMode) -> String {
    let short_name = plugin_full_name
        .rsplit('.')
        .next()
        .unwrap_or(plugin_full_name);

    let mut lines = vec![
        format!("- name: {} task", capitalize_title(&short_name.replace('_', " "))),
        format!("  {plugin_full_name}:"),
    ];
    for (name, opt) in sorted_options(options) {
        push_option(&mut lines, name, opt, 4, false, mode);
    }
    lines.join("\n")
}

/// Options ordered required-first, then by name.
pub fn sorted_options(options: &Options) -> Vec<(&str, &PluginOption)> {
    let mut sorted: Vec<_> = options
        .iter()
        .map(|(name, opt)| (name.as_str(), opt))
        .collect();
    // BTreeMap iteration is already by name; the sort is stable.
    sorted.sort_by_key(|(_, opt)| !opt.required);
    sorted
}

/// Append the line(s) for one option.
///
/// `first_in_list` renders the option as the first key of a list item, with
/// the `- ` marker hanging two columns left of `indent`.
fn push_option(
    lines: &mut Vec<String>,
    name: &str,
    opt: &PluginOption,
    indent: usize,
    first_in_list: bool,
    mode: CommentMode,
) {
    let comment = line_comment(opt, mode);
    let lead = if first_in_list {
        format!("{}- ", " ".repeat(indent - 2))
    } else {
        " ".repeat(indent)
    };

    if !opt.suboptions.is_empty() {
        lines.push(format!("{lead}{name}:{comment}"));
        let sub = sorted_options(&opt.suboptions);
        if opt.is_list() {
            for (i, (sub_name, sub_opt)) in sub.into_iter().enumerate() {
                push_option(lines, sub_name, sub_opt, indent + 4, i == 0, mode);
            }
        } else {
            for (sub_name, sub_opt) in sub {
                push_option(lines, sub_name, sub_opt, indent + 2, false, mode);
            }
        }
    } else if opt.is_list() {
        if let Some(default) = &opt.default {
            lines.push(format!("{lead}{name}: {}{comment}", yaml_scalar(default)));
        } else {
            lines.push(format!("{lead}{name}:{comment}"));
            lines.push(format!("{}  - {}", " ".repeat(indent), element_value(name, opt)));
        }
    } else {
        lines.push(format!("{lead}{name}: {}{comment}", example_value(name, opt)));
    }
}

fn line_comment(opt: &PluginOption, mode: CommentMode) -> String {
    match mode {
        CommentMode::None => String::new(),
        CommentMode::OptionalOnly if opt.required => String::new(),
        CommentMode::OptionalOnly => "  # optional".to_owned(),
        CommentMode::Descriptions => {
            let requirement = if opt.required { "required" } else { "optional" };
            format!(
                "  # ({}, {requirement}) {}",
                opt.type_or_str(),
                short_description(opt.first_description().unwrap_or_default())
            )
        }
    }
}

/// Collapse whitespace and cut long descriptions to fit a comment.
fn short_description(description: &str) -> String {
    let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_DESCRIPTION_CHARS {
        let cut: String = collapsed.chars().take(TRUNCATED_DESCRIPTION_CHARS).collect();
        format!("{cut}...")
    } else {
        collapsed
    }
}

/// Value for a scalar option: default, then first choice, then by type.
pub fn example_value(name: &str, opt: &PluginOption) -> String {
    if let Some(default) = &opt.default {
        return yaml_scalar(default);
    }
    if let Some(choice) = opt.choices.first() {
        return yaml_scalar(choice);
    }
    match opt.type_name.as_deref() {
        Some("bool" | "boolean") => "true".to_owned(),
        Some("int" | "integer") => "0".to_owned(),
        Some("float") => "0.0".to_owned(),
        Some("path") => "\"/path/to/file\"".to_owned(),
        Some("raw" | "jsonarg" | "dict") => "{}".to_owned(),
        Some("list") => "[]".to_owned(),
        _ => contextual_example(name),
    }
}

/// Representative list element for a list option without suboptions.
fn element_value(name: &str, opt: &PluginOption) -> String {
    if let Some(choice) = opt.choices.first() {
        return yaml_scalar(choice);
    }
    match opt.elements.as_deref() {
        Some("dict") => "{}".to_owned(),
        Some("int" | "integer") => "1".to_owned(),
        Some("bool" | "boolean") => "true".to_owned(),
        _ => format!("\"{name}_item\""),
    }
}

/// Guess a string value from the parameter name.
pub fn contextual_example(name: &str) -> String {
    let lower = name.to_lowercase();
    CONTEXTUAL_EXAMPLES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map_or_else(|| format!("\"{name}_value\""), |(_, value)| (*value).to_owned())
}

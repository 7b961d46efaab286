//! Plugin documentation data model.
//!
//! Mirrors the JSON emitted by `ansible-doc --json` (and the module section of
//! `ansible-doc --metadata-dump`): a mapping from fully-qualified plugin name
//! to its documentation, examples and return values.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Documentation for every plugin in a collection, keyed by full name.
pub type DocOutput = BTreeMap<String, PluginData>;

/// Parameter tree, keyed by option name.
pub type Options = BTreeMap<String, PluginOption>;

/// A documentation field that may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Text {
    One(String),
    Many(Vec<String>),
}

impl Text {
    /// All lines of the field.
    pub fn lines(&self) -> &[String] {
        match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(lines) => lines,
        }
    }

    /// Lines of an optional field; missing fields have no lines.
    pub fn lines_of(text: Option<&Self>) -> &[String] {
        match text {
            Some(text) => text.lines(),
            None => &[],
        }
    }
}

/// Documentation data for one plugin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginData {
    pub doc: Option<PluginDoc>,
    pub examples: Option<String>,
    #[serde(rename = "return")]
    pub returns: Option<BTreeMap<String, ReturnValue>>,
}

/// The `doc` section of a plugin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginDoc {
    pub module: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<Text>,
    #[serde(deserialize_with = "version_string")]
    pub version_added: Option<String>,
    pub author: Option<Text>,
    pub notes: Option<Text>,
    pub requirements: Option<Text>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Options,
}

/// One documented parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginOption {
    pub description: Option<Text>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub default: Option<Value>,
    #[serde(deserialize_with = "choice_list")]
    pub choices: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    pub elements: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub suboptions: Options,
    #[serde(deserialize_with = "version_string")]
    pub version_added: Option<String>,
}

impl PluginOption {
    /// Declared type, `str` when absent.
    pub fn type_or_str(&self) -> &str {
        self.type_name.as_deref().unwrap_or("str")
    }

    /// Whether the declared type is `list`.
    pub fn is_list(&self) -> bool {
        self.type_name.as_deref() == Some("list")
    }

    /// First description line, if any.
    pub fn first_description(&self) -> Option<&str> {
        Text::lines_of(self.description.as_ref())
            .first()
            .map(String::as_str)
    }
}

/// One documented return value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReturnValue {
    pub description: Option<Text>,
    pub returned: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub sample: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub contains: BTreeMap<String, ReturnValue>,
}

/// Read an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Choices as a list, or as a map of choice to description.
fn choice_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => map.keys().cloned().map(Value::String).collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    })
}

/// `version_added` is usually a string but YAML sources often leave `2.9`
/// unquoted.
fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(version)) => Some(version),
        Some(other) => Some(other.to_string()),
        None => None,
    })
}

/// Error loading plugin documentation JSON.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object mapping plugin names to documentation")]
    NotAnObject,
}

/// Read and parse a documentation JSON file.
pub fn load_doc_output(path: &Path) -> Result<DocOutput, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    parse_doc_output(&raw)
}

/// Parse documentation JSON.
///
/// The `{"all": {"module": {...}}}` wrapper produced by `--metadata-dump` is
/// unwrapped. Entries that do not deserialize as plugin data are skipped with
/// a warning rather than failing the whole collection.
pub fn parse_doc_output(json: &str) -> Result<DocOutput, LoadError> {
    let mut root: Value = serde_json::from_str(json)?;

    if let Some(modules) = root.pointer_mut("/all/module").map(Value::take) {
        root = modules;
    }

    let Value::Object(entries) = root else {
        return Err(LoadError::NotAnObject);
    };

    let mut plugins = DocOutput::new();
    for (name, value) in entries {
        match serde_json::from_value::<PluginData>(value) {
            Ok(data) => {
                plugins.insert(name, data);
            }
            Err(e) => {
                tracing::warn!(plugin = %name, error = %e, "Skipping unreadable plugin entry");
            }
        }
    }
    Ok(plugins)
}

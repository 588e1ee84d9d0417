//! Configuration record, documented defaults and normalization.
//!
//! A raw, possibly sparse key/value record (JSON or YAML) is normalized once
//! into an immutable [`Config`]. Every recognized option receives either the
//! caller's explicit value or its default; unrecognized keys are carried
//! along in [`Config::extra`] but never consulted.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, LeafPathError, Result};
use crate::xml::local_name;

/// Namespace prefix used when the configuration does not name one.
pub const DEFAULT_NAMESPACE: &str = "d";

/// Namespace prefix pattern: an NCName-like token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("valid regex"));

/// Key used to group siblings when computing occurrence indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SiblingIdentity {
    /// Local tag name only.
    Tag,
    /// Local tag name plus the attribute-predicate clause.
    #[default]
    TagAndAttributes,
}

/// How `startAtTag` shortens the emitted paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartStrategy {
    /// Traverse only the subtree of the first matching element.
    #[default]
    Reroot,
    /// Build full paths, then cut them textually at the first matching segment.
    Truncate,
}

/// Configuration record as supplied by the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    namespace: Option<String>,
    attributes_to_include_in_path: Option<Vec<String>>,
    child_filters: Option<Vec<String>>,
    include_all_child_values: Option<bool>,
    ignore_leaf_nodes: Option<Vec<String>>,
    force_index_one_for: Option<Vec<String>>,
    exceptions_to_index_one_forcing: Option<Vec<String>>,
    include_leaf_value_predicate: Option<bool>,
    disable_leaf_node_indexing: Option<bool>,
    sibling_identity: Option<SiblingIdentity>,
    start_at_tag: Option<String>,
    start_strategy: Option<StartStrategy>,
    debug: Option<bool>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Normalized, read-only configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Prefix prepended to every tag name in output paths (may be empty).
    pub namespace: String,

    /// Attributes whose value becomes an equality predicate, in listed order.
    pub attributes_to_include_in_path: Vec<String>,

    /// Child names used for child-value predicates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_filters: Option<Vec<String>>,

    /// Legacy child predicates for every value child (only without `child_filters`).
    pub include_all_child_values: bool,

    /// Tags skipped together with their whole subtree.
    pub ignore_leaf_nodes: BTreeSet<String>,

    /// Tags whose first occurrence renders `[1]`; empty means every tag.
    pub force_index_one_for: BTreeSet<String>,

    /// Tags whose first occurrence never renders `[1]`.
    pub exceptions_to_index_one_forcing: BTreeSet<String>,

    /// Append the leaf's own text as a predicate on its segment.
    pub include_leaf_value_predicate: bool,

    /// Sibling grouping key.
    pub sibling_identity: SiblingIdentity,

    /// Re-root emitted paths at the first element with this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at_tag: Option<String>,

    /// Strategy used with `start_at_tag`.
    pub start_strategy: StartStrategy,

    /// Verbose diagnostic tracing. Never changes output.
    pub debug: bool,

    /// Unrecognized keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            attributes_to_include_in_path: Vec::new(),
            child_filters: None,
            include_all_child_values: false,
            ignore_leaf_nodes: BTreeSet::new(),
            force_index_one_for: BTreeSet::new(),
            exceptions_to_index_one_forcing: BTreeSet::new(),
            include_leaf_value_predicate: true,
            sibling_identity: SiblingIdentity::default(),
            start_at_tag: None,
            start_strategy: StartStrategy::default(),
            debug: false,
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Normalize a raw configuration value.
    ///
    /// `null` is accepted as an empty record.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the value is not an object, when an
    /// option has the wrong shape, or when options contradict each other.
    ///
    /// # Examples
    /// ```
    /// use leafpath::config::Config;
    /// use serde_json::json;
    ///
    /// let config = Config::from_value(json!({"attributesToIncludeInPath": ["id"]})).unwrap();
    /// assert_eq!(config.namespace, "d");
    /// assert_eq!(config.attributes_to_include_in_path, vec!["id"]);
    ///
    /// assert!(Config::from_value(json!({"ignoreLeafNodes": "item"})).is_err());
    /// ```
    pub fn from_value(value: Value) -> std::result::Result<Self, ConfigError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => return Err(ConfigError::NotAnObject(value_kind(&other))),
        };

        let raw: RawConfig =
            serde_json::from_value(Value::Object(map)).map_err(ConfigError::InvalidShape)?;
        Self::normalize(raw)
    }

    /// Parse and normalize a JSON configuration text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value)?)
    }

    /// Parse and normalize a YAML configuration text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml_ng::from_str(text)?;
        Ok(Self::from_value(value)?)
    }

    /// Load a configuration file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading configuration file");
        let text = fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    /// Resolve a command-line configuration argument.
    ///
    /// An existing file is loaded with [`Config::from_file`]; text starting
    /// with `{` is parsed as a JSON literal.
    pub fn from_argument(arg: &str) -> Result<Self> {
        let path = Path::new(arg);
        if path.is_file() {
            return Self::from_file(path);
        }

        if arg.trim_start().starts_with('{') {
            return Self::from_json_str(arg);
        }

        Err(LeafPathError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Configuration file does not exist: {arg}"),
        )))
    }

    fn normalize(raw: RawConfig) -> std::result::Result<Self, ConfigError> {
        let defaults = Self::default();

        let namespace = match raw.namespace {
            Some(ns) => validate_namespace(ns.trim())?,
            None => defaults.namespace,
        };

        // Both spellings of the leaf predicate switch may be present, but must agree
        if let (Some(include), Some(disable)) = (
            raw.include_leaf_value_predicate,
            raw.disable_leaf_node_indexing,
        ) {
            if include == disable {
                return Err(ConfigError::Conflict(format!(
                    "includeLeafValuePredicate={include} contradicts disableLeafNodeIndexing={disable}"
                )));
            }
        }
        let include_leaf_value_predicate = raw
            .include_leaf_value_predicate
            .or(raw.disable_leaf_node_indexing.map(|disable| !disable))
            .unwrap_or(defaults.include_leaf_value_predicate);

        let include_all_child_values = raw.include_all_child_values.unwrap_or(false);
        if raw.child_filters.is_some() && include_all_child_values {
            return Err(ConfigError::Conflict(
                "childFilters cannot be combined with includeAllChildValues".to_string(),
            ));
        }

        let child_filters = raw
            .child_filters
            .map(|names| name_list(names, "childFilters"))
            .transpose()?;

        let start_at_tag = raw
            .start_at_tag
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty());

        Ok(Self {
            namespace,
            attributes_to_include_in_path: name_list(
                raw.attributes_to_include_in_path.unwrap_or_default(),
                "attributesToIncludeInPath",
            )?,
            child_filters,
            include_all_child_values,
            ignore_leaf_nodes: name_set(raw.ignore_leaf_nodes, "ignoreLeafNodes")?,
            force_index_one_for: name_set(raw.force_index_one_for, "forceIndexOneFor")?,
            exceptions_to_index_one_forcing: name_set(
                raw.exceptions_to_index_one_forcing,
                "exceptionsToIndexOneForcing",
            )?,
            include_leaf_value_predicate,
            sibling_identity: raw.sibling_identity.unwrap_or(defaults.sibling_identity),
            start_at_tag,
            start_strategy: raw.start_strategy.unwrap_or(defaults.start_strategy),
            debug: raw.debug.unwrap_or(defaults.debug),
            extra: raw.extra,
        })
    }

    /// Prefix a local name with the configured namespace.
    ///
    /// # Examples
    /// ```
    /// use leafpath::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.qualify("item"), "d:item");
    /// ```
    #[must_use]
    pub fn qualify(&self, local: &str) -> String {
        if self.namespace.is_empty() {
            local.to_string()
        } else {
            format!("{}:{local}", self.namespace)
        }
    }

    /// Check if elements with this local name are skipped.
    #[must_use]
    pub fn is_ignored(&self, tag: &str) -> bool {
        self.ignore_leaf_nodes.contains(tag)
    }

    /// Check if the first occurrence of this tag renders an explicit `[1]`.
    #[must_use]
    pub fn renders_index_one(&self, tag: &str) -> bool {
        let forced = self.force_index_one_for.is_empty() || self.force_index_one_for.contains(tag);
        forced && !self.exceptions_to_index_one_forcing.contains(tag)
    }
}

fn validate_namespace(ns: &str) -> std::result::Result<String, ConfigError> {
    if ns.is_empty() || NAMESPACE_PATTERN.is_match(ns) {
        Ok(ns.to_string())
    } else {
        Err(ConfigError::InvalidNamespace(ns.to_string()))
    }
}

/// Reduce names to their local part, rejecting blanks and dropping duplicates.
fn name_list(
    names: Vec<String>,
    option: &'static str,
) -> std::result::Result<Vec<String>, ConfigError> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in &names {
        let local = local_name(name.trim());
        if local.is_empty() {
            return Err(ConfigError::EmptyTagName { option });
        }
        if !result.iter().any(|existing| existing == local) {
            result.push(local.to_string());
        }
    }
    Ok(result)
}

fn name_set(
    names: Option<Vec<String>>,
    option: &'static str,
) -> std::result::Result<BTreeSet<String>, ConfigError> {
    Ok(name_list(names.unwrap_or_default(), option)?
        .into_iter()
        .collect())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

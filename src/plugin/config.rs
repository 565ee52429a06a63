//! Plugin configuration.
//!
//! Configuration reaches a plugin as a generic JSON element. A `null`
//! element means "no configuration" and yields the plugin's defaults.
//!
//! # Examples
//!
//! ```
//! use crowd_lemmatizer::plugin::config::{CalculationMode, LemmatizerConfig, PluginConfig};
//! use serde_json::json;
//!
//! let config = LemmatizerConfig::build_from_json(&json!({"calculate": "new"})).unwrap();
//! assert_eq!(config.calculate, CalculationMode::New);
//!
//! // Unknown modes fall back to "all".
//! let config = LemmatizerConfig::build_from_json(&json!({"calculate": "some"})).unwrap();
//! assert_eq!(config.calculate, CalculationMode::All);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{LemmatizeError, Result};

/// Trait for plugin configurations built from structured data.
pub trait PluginConfig: Sized + Default {
    /// Build a configuration from a JSON element.
    fn build_from_json(value: &Value) -> Result<Self>;
}

/// Deserialize a configuration object, mapping `null` to the default.
///
/// Any other non-object element is rejected.
pub fn build_from_json<T>(value: &Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Null => Ok(T::default()),
        Value::Object(_) => Ok(T::deserialize(value)?),
        other => Err(LemmatizeError::config(format!(
            "expected a JSON object, found {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Which tokens a lemmatizer computes lemmas for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Lemmatize every non-stop-word token, overwriting existing lemmas.
    #[default]
    All,
    /// Lemmatize only non-stop-word tokens without a lemma.
    New,
}

impl CalculationMode {
    /// The literal used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::All => "all",
            CalculationMode::New => "new",
        }
    }
}

impl From<&str> for CalculationMode {
    /// Parse a configuration literal. Anything but `"new"` means `All`.
    fn from(value: &str) -> Self {
        match value {
            "new" => CalculationMode::New,
            _ => CalculationMode::All,
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of the lemmatizer plugin.
///
/// Schema: `{ "calculate": "all" | "new" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmatizerConfig {
    /// Which tokens to lemmatize
    #[serde(default, deserialize_with = "deserialize_mode")]
    pub calculate: CalculationMode,
}

impl LemmatizerConfig {
    /// Create a configuration with the given mode.
    pub fn new(calculate: CalculationMode) -> Self {
        LemmatizerConfig { calculate }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::build_from_json(&value)
    }
}

impl PluginConfig for LemmatizerConfig {
    fn build_from_json(value: &Value) -> Result<Self> {
        build_from_json(value)
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> std::result::Result<CalculationMode, D::Error>
where
    D: Deserializer<'de>,
{
    let mode = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => CalculationMode::default(),
        Some(Value::String(literal)) => {
            let mode = CalculationMode::from(literal.as_str());
            if mode.as_str() != literal {
                log::warn!("Unknown calculate mode '{literal}', falling back to '{mode}'");
            }
            mode
        }
        Some(other) => {
            log::warn!("Ignoring non-string calculate mode {other}, using 'all'");
            CalculationMode::All
        }
    };
    Ok(mode)
}

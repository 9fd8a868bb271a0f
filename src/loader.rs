//! Document loading from JSON or YAML text
//!
//! Text starting with `{` (after whitespace) is parsed as JSON, anything else
//! as YAML. YAML mappings are converted key by key so that non-string keys
//! such as `200:` become the string `"200"`, the way JSON documents spell
//! them.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported YAML value at '{0}' (tagged values and non-finite numbers are not allowed)")]
    Unsupported(String),

    #[error("document is empty")]
    Empty,
}

/// Read and parse a document file
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}

/// Parse document text, detecting JSON by a leading `{`
pub fn parse_document(text: &str) -> Result<Value, LoadError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(LoadError::Empty);
    }
    if trimmed.starts_with('{') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    let yaml: Yaml = serde_yaml::from_str(text)?;
    if yaml.is_null() {
        return Err(LoadError::Empty);
    }
    yaml_to_json(&yaml, "")
}

fn yaml_to_json(value: &Yaml, at: &str) -> Result<Value, LoadError> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| LoadError::Unsupported(at.to_string()))?
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json(item, &format!("{at}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = yaml_key(k).ok_or_else(|| LoadError::Unsupported(at.to_string()))?;
                let child = if at.is_empty() {
                    key.clone()
                } else {
                    format!("{at}.{key}")
                };
                let converted = yaml_to_json(v, &child)?;
                map.insert(key, converted);
            }
            Value::Object(map)
        }
        Yaml::Tagged(_) => return Err(LoadError::Unsupported(at.to_string())),
    })
}

/// Stringify a scalar mapping key
fn yaml_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        _ => None,
    }
}

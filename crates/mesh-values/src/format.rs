//! YAML and JSON codecs for settings trees

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

impl Value {
    /// Parse a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    /// Convert a JSON value, rejecting numbers that are not `i64`.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        from_json_at(value, "")
    }
}

fn from_json_at(value: serde_json::Value, path: &str) -> Result<Value> {
    let converted = match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(i) => Value::Int(i),
            None => {
                return Err(Error::UnsupportedNumber {
                    path: path.to_string(),
                    value: number.to_string(),
                });
            }
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Seq(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| from_json_at(item, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(object) => {
            let mut map = Mapping::new();
            for (key, item) in object {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                map.insert(key, from_json_at(item, &child)?);
            }
            Value::Map(map)
        }
    };
    Ok(converted)
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::String(s) => serde_json::Value::String(s),
            Value::Seq(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, item)| (key, serde_json::Value::from(item)))
                    .collect(),
            ),
        }
    }
}

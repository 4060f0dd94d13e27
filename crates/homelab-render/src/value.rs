//! value representation
//!
//! A parsed homelab config is a tree of the following data types
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - decimal (f64, also used for integers that do not fit into i64)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! YAML allows non-string mapping keys. Scalar keys are converted to their textual form,
//! everything else (sequences or mappings used as keys) is dropped since no config path can
//! ever address it.
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Array(Vec<Value>),
    Object(indexmap::IndexMap<String, Value>),
}

impl Value {
    /// Empty object, what an empty document turns into
    pub fn empty_object() -> Self {
        Value::Object(Default::default())
    }

    /// Look up a direct child of an object
    ///
    /// Returns `None` for missing keys and for every value that is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Human readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_yaml::Number> for Value {
    fn from(value: serde_yaml::Number) -> Self {
        if let Some(int) = value.as_i64() {
            return Value::Integer(int);
        }

        // u64 beyond i64::MAX and all floats (including .nan/.inf)
        Value::Decimal(value.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<serde_yaml::Mapping> for Value {
    fn from(value: serde_yaml::Mapping) -> Self {
        Value::Object(
            value
                .into_iter()
                .filter_map(|(key, value)| {
                    let Some(key) = scalar_key(&key) else {
                        tracing::trace!(?key, "dropping non-scalar mapping key");
                        return None;
                    };
                    Some((key, value.into()))
                })
                .collect(),
        )
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => b.into(),
            Yaml::Number(n) => n.into(),
            Yaml::String(s) => s.into(),
            Yaml::Sequence(seq) => seq.into(),
            Yaml::Mapping(map) => map.into(),
            // `!tag value` - the tag carries no meaning for config lookups
            Yaml::Tagged(tagged) => tagged.value.into(),
        }
    }
}

fn scalar_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        Yaml::Tagged(tagged) => scalar_key(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

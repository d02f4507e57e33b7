use crate::{Deserialize, Serialize};

use std::{any::type_name, fmt, marker::PhantomData, sync::Arc};

use serde_json::{Map, Number, Value};
use yacon_core::{
    Error, NodeKind, Result, TypeInfo, TypedConverter, YamlFormatterOptions, YamlReader,
    YamlWriter, yaml_rust::Yaml,
};

/// Arbitrary YAML as a `serde_json::Value`.
///
/// Mapping keys must be scalars and are read as their text. Floats with no
/// JSON form (`.inf`, `.nan`) are rejected.
#[derive(Debug, Clone, Copy)]
pub struct JsonValueConverter {
    max_depth: usize,
}

impl Default for JsonValueConverter {
    fn default() -> Self {
        Self {
            max_depth: YamlFormatterOptions::default().max_depth,
        }
    }
}

impl JsonValueConverter {
    fn write_value(&self, writer: &mut YamlWriter, value: &Value, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }

        match value {
            Value::Null => writer.write_null(),
            Value::Bool(value) => writer.write_bool(*value),
            Value::Number(number) => write_number(writer, number),
            Value::String(value) => writer.write_str(value),
            Value::Array(items) => {
                writer.begin_sequence()?;
                for item in items {
                    self.write_value(writer, item, depth + 1)?;
                }
                writer.end_sequence()
            }
            Value::Object(entries) => {
                writer.begin_mapping()?;
                for (key, item) in entries {
                    writer.write_str(key)?;
                    self.write_value(writer, item, depth + 1)?;
                }
                writer.end_mapping()
            }
        }
    }

    fn read_value(&self, reader: &mut YamlReader<'_>, depth: usize) -> Result<Value> {
        if depth > self.max_depth {
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }

        match reader.peek_kind()? {
            NodeKind::Sequence => {
                let mut items = Vec::new();
                reader.begin_sequence()?;
                while !reader.end_sequence()? {
                    items.push(self.read_value(reader, depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            NodeKind::Mapping => {
                let mut entries = Map::new();
                reader.begin_mapping()?;
                while !reader.end_mapping()? {
                    let key = reader.read_scalar()?;
                    if entries.contains_key(&key) {
                        return Err(reader.format_error(format!("duplicate mapping key `{key}`")));
                    }
                    let value = self.read_value(reader, depth + 1)?;
                    entries.insert(key, value);
                }
                Ok(Value::Object(entries))
            }
            _ => read_scalar(reader),
        }
    }
}

fn write_number(writer: &mut YamlWriter, number: &Number) -> Result<()> {
    if let Some(value) = number.as_i64() {
        writer.write_i64(value)
    } else if let Some(value) = number.as_u64() {
        writer.write_u64(value)
    } else {
        match number.as_f64() {
            Some(value) => writer.write_f64(value),
            None => Err(Error::SerializeError(format!("number {number} has no YAML form"))),
        }
    }
}

fn read_scalar(reader: &mut YamlReader<'_>) -> Result<Value> {
    match reader.read_typed_scalar()? {
        Yaml::Null => Ok(Value::Null),
        Yaml::Boolean(value) => Ok(Value::Bool(value)),
        Yaml::Integer(value) => Ok(Value::from(value)),
        Yaml::Real(text) => real_number(&text)
            .ok_or_else(|| reader.format_error(format!("`{text}` has no JSON form"))),
        Yaml::String(value) => Ok(Value::String(value)),
        other => Err(reader.format_error(format!("unsupported scalar {other:?}"))),
    }
}

fn real_number(text: &str) -> Option<Value> {
    if let Ok(value) = text.parse::<u64>() {
        return Some(Value::from(value));
    }
    let value = Yaml::Real(text.to_owned()).as_f64()?;
    Number::from_f64(value).map(Value::Number)
}

impl TypedConverter for JsonValueConverter {
    type Value = Value;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &Value) -> Result<()> {
        self.write_value(writer, value, 1)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<Value> {
        self.read_value(reader, 1)
    }

    fn on_formatter_set(&mut self, formatter: Option<&Arc<YamlFormatterOptions>>) {
        if let Some(formatter) = formatter {
            self.max_depth = formatter.max_depth;
        }
    }
}

pub struct SerdeConverter<T> {
    json: JsonValueConverter,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeConverter<T> {
    pub fn new() -> Self {
        Self {
            json: JsonValueConverter::default(),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeConverter<{}>", type_name::<T>())
    }
}

impl<T: Serialize + Deserialize + Send + 'static> TypedConverter for SerdeConverter<T> {
    type Value = T;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &T) -> Result<()> {
        let json = serde_json::to_value(value).map_err(|e| Error::SerializeError(e.to_string()))?;
        self.json.write_yaml(writer, &json)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, ty: &TypeInfo) -> Result<T> {
        let json = self.json.read_yaml(reader, ty)?;
        serde_json::from_value(json).map_err(|e: serde_json::Error| {
            Error::DeserializeError(e.to_string())
        })
    }

    fn on_formatter_set(&mut self, formatter: Option<&Arc<YamlFormatterOptions>>) {
        self.json.on_formatter_set(formatter);
    }
}

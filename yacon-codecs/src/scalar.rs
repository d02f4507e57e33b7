use std::sync::Arc;

use yacon_core::{
    Result, TypeInfo, TypedConverter, YamlFormatterOptions, YamlReader, YamlWriter,
    yaml_rust::Yaml,
};

fn describe(node: &Yaml) -> &'static str {
    match node {
        Yaml::Null => "null",
        Yaml::Boolean(_) => "a boolean",
        Yaml::Integer(_) => "an integer",
        Yaml::Real(_) => "a float",
        Yaml::String(_) => "a string",
        _ => "a non-scalar",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl TypedConverter for BoolConverter {
    type Value = bool;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &bool) -> Result<()> {
        writer.write_bool(*value)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<bool> {
        match reader.read_typed_scalar()? {
            Yaml::Boolean(value) => Ok(value),
            other => Err(reader.format_error(format!("expected a boolean, found {}", describe(&other)))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct I64Converter;

impl TypedConverter for I64Converter {
    type Value = i64;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &i64) -> Result<()> {
        writer.write_i64(*value)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<i64> {
        match reader.read_typed_scalar()? {
            Yaml::Integer(value) => Ok(value),
            other => Err(reader.format_error(format!("expected an integer, found {}", describe(&other)))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct I32Converter;

impl TypedConverter for I32Converter {
    type Value = i32;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &i32) -> Result<()> {
        writer.write_i64(i64::from(*value))
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, ty: &TypeInfo) -> Result<i32> {
        let value = I64Converter.read_yaml(reader, ty)?;
        i32::try_from(value)
            .map_err(|_| reader.format_error(format!("integer {value} is out of range for i32")))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct U64Converter;

impl TypedConverter for U64Converter {
    type Value = u64;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &u64) -> Result<()> {
        writer.write_u64(*value)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<u64> {
        let text = reader.read_plain_scalar()?;
        text.parse::<u64>()
            .map_err(|_| reader.format_error(format!("expected an unsigned integer, found `{text}`")))
    }
}

/// Floats. Writes with a fixed number of fractional digits when a
/// precision is set. The formatter's `float_precision` takes over from the
/// one given to `with_precision` while it is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct F64Converter {
    precision: Option<usize>,
    formatter_precision: Option<usize>,
}

impl F64Converter {
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
            formatter_precision: None,
        }
    }

    fn precision(&self) -> Option<usize> {
        self.formatter_precision.or(self.precision)
    }
}

impl TypedConverter for F64Converter {
    type Value = f64;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &f64) -> Result<()> {
        match self.precision() {
            Some(precision) if value.is_finite() => writer.write_plain(&format!("{value:.precision$}")),
            _ => writer.write_f64(*value),
        }
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<f64> {
        let node = reader.read_typed_scalar()?;
        match &node {
            Yaml::Integer(value) => Ok(*value as f64),
            Yaml::Real(_) => node
                .as_f64()
                .ok_or_else(|| reader.format_error("malformed float")),
            other => Err(reader.format_error(format!("expected a float, found {}", describe(other)))),
        }
    }

    fn on_formatter_set(&mut self, formatter: Option<&Arc<YamlFormatterOptions>>) {
        self.formatter_precision = formatter.and_then(|f| f.float_precision);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl TypedConverter for StringConverter {
    type Value = String;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &String) -> Result<()> {
        writer.write_str(value)
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<String> {
        reader.read_scalar()
    }
}

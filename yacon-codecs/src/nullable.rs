use std::sync::Arc;

use yacon_core::{
    ContextDeserializer, ContextSerializer, Result, TypeInfo, TypedConverter,
    YamlFormatterOptions, YamlReader, YamlWriter,
};

/// `Option` over another converter's value. `None` is written as null and
/// a plain null scalar (`~`, `null`, empty) reads back as `None`.
#[derive(Debug, Clone, Default)]
pub struct NullableConverter<C> {
    inner: C,
}

impl<C: TypedConverter> NullableConverter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: TypedConverter> TypedConverter for NullableConverter<C> {
    type Value = Option<C::Value>;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &Option<C::Value>) -> Result<()> {
        match value {
            Some(value) => self.inner.write_yaml(writer, value),
            None => writer.write_null(),
        }
    }

    fn read_yaml(&self, reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<Option<C::Value>> {
        if reader.is_null()? {
            reader.read_null()?;
            return Ok(None);
        }
        self.inner.read_yaml(reader, &TypeInfo::of::<C::Value>()).map(Some)
    }

    fn write_yaml_with(
        &self,
        writer: &mut YamlWriter,
        value: &Option<C::Value>,
        serializer: &mut dyn ContextSerializer,
    ) -> Result<()> {
        match value {
            Some(value) => self.inner.write_yaml_with(writer, value, serializer),
            None => writer.write_null(),
        }
    }

    fn read_yaml_with(
        &self,
        reader: &mut YamlReader<'_>,
        _ty: &TypeInfo,
        deserializer: &mut dyn ContextDeserializer,
    ) -> Result<Option<C::Value>> {
        if reader.is_null()? {
            reader.read_null()?;
            return Ok(None);
        }
        self.inner
            .read_yaml_with(reader, &TypeInfo::of::<C::Value>(), deserializer)
            .map(Some)
    }

    fn on_formatter_set(&mut self, formatter: Option<&Arc<YamlFormatterOptions>>) {
        self.inner.on_formatter_set(formatter);
    }
}

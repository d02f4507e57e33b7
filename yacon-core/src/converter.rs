use crate::{
    ContextDeserializer, ContextSerializer, Error, Result, TypeInfo, YamlFormatterOptions,
    YamlReader, YamlWriter,
};

use std::{
    any::{Any, type_name},
    sync::Arc,
};

/// Untyped converter surface, the shape the engine dispatches on.
///
/// Converters are registered together in a
/// [`ConverterRegistry`](crate::ConverterRegistry) and asked in
/// registration order whether they handle a given type; the first one that
/// answers `true` gets the `read`/`write` call.
pub trait YamlConverter: Send + Sync {
    fn can_convert(&self, ty: &TypeInfo) -> bool;

    /// Reads a value of type `ty` from the current reader position.
    ///
    /// Nested values may be read through `deserializer`; its errors must be
    /// returned unchanged.
    fn read(
        &self,
        reader: &mut YamlReader<'_>,
        ty: &TypeInfo,
        deserializer: &mut dyn ContextDeserializer,
    ) -> Result<Box<dyn Any + Send>>;

    /// Writes `value`, declared as `ty`, as exactly one node.
    fn write(
        &self,
        writer: &mut YamlWriter,
        value: &dyn Any,
        ty: &TypeInfo,
        serializer: &mut dyn ContextSerializer,
    ) -> Result<()>;

    fn formatter(&self) -> Option<&Arc<YamlFormatterOptions>>;

    fn set_formatter(&mut self, formatter: Option<Arc<YamlFormatterOptions>>);

    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Strongly typed converter for a single value type.
///
/// Implement `read_yaml` and `write_yaml`, then wrap the converter in
/// [`Converter`] to register it. Converters that need the engine for
/// nested values override the `_with` variants, which receive the
/// session's context; the defaults drop the context and call the
/// two-argument methods.
pub trait TypedConverter: Send + Sync + 'static {
    type Value: Any + Send;

    fn write_yaml(&self, writer: &mut YamlWriter, value: &Self::Value) -> Result<()>;

    fn read_yaml(&self, reader: &mut YamlReader<'_>, ty: &TypeInfo) -> Result<Self::Value>;

    fn write_yaml_with(
        &self,
        writer: &mut YamlWriter,
        value: &Self::Value,
        _serializer: &mut dyn ContextSerializer,
    ) -> Result<()> {
        self.write_yaml(writer, value)
    }

    fn read_yaml_with(
        &self,
        reader: &mut YamlReader<'_>,
        ty: &TypeInfo,
        _deserializer: &mut dyn ContextDeserializer,
    ) -> Result<Self::Value> {
        self.read_yaml(reader, ty)
    }

    /// Defaults to exact type identity with `Self::Value`.
    fn can_convert(&self, ty: &TypeInfo) -> bool {
        ty.is::<Self::Value>()
    }

    fn on_formatter_set(&mut self, _formatter: Option<&Arc<YamlFormatterOptions>>) {}

    fn into_converter(self) -> Converter<Self>
    where
        Self: Sized,
    {
        Converter::new(self)
    }
}

/// Bridges a [`TypedConverter`] to the untyped [`YamlConverter`] surface.
#[derive(Debug, Default)]
pub struct Converter<C> {
    inner: C,
    formatter: Option<Arc<YamlFormatterOptions>>,
}

impl<C> Converter<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            formatter: None,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: TypedConverter> From<C> for Converter<C> {
    fn from(inner: C) -> Self {
        Self::new(inner)
    }
}

impl<C: TypedConverter> YamlConverter for Converter<C> {
    fn can_convert(&self, ty: &TypeInfo) -> bool {
        self.inner.can_convert(ty)
    }

    fn read(
        &self,
        reader: &mut YamlReader<'_>,
        ty: &TypeInfo,
        deserializer: &mut dyn ContextDeserializer,
    ) -> Result<Box<dyn Any + Send>> {
        let value = self.inner.read_yaml_with(reader, ty, deserializer)?;
        Ok(Box::new(value))
    }

    fn write(
        &self,
        writer: &mut YamlWriter,
        value: &dyn Any,
        ty: &TypeInfo,
        serializer: &mut dyn ContextSerializer,
    ) -> Result<()> {
        let Some(value) = value.downcast_ref::<C::Value>() else {
            let found = if ty.is::<C::Value>() {
                "a value of another type"
            } else {
                ty.name()
            };
            tracing::error!(
                converter = self.name(),
                expected = type_name::<C::Value>(),
                declared = %ty,
                "value handed to converter is not of its type"
            );
            return Err(Error::TypeMismatch {
                expected: type_name::<C::Value>(),
                found,
            });
        };

        self.inner.write_yaml_with(writer, value, serializer)
    }

    fn formatter(&self) -> Option<&Arc<YamlFormatterOptions>> {
        self.formatter.as_ref()
    }

    fn set_formatter(&mut self, formatter: Option<Arc<YamlFormatterOptions>>) {
        self.inner.on_formatter_set(formatter.as_ref());
        self.formatter = formatter;
    }

    fn name(&self) -> &str {
        type_name::<C>()
    }
}

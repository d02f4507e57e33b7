use std::{
    any::{Any, type_name},
    fmt,
    marker::PhantomData,
};

use yacon_core::{
    ContextDeserializer, ContextSerializer, Error, Result, TypeInfo, TypedConverter, YamlReader,
    YamlWriter,
};

/// `Vec<T>` as a YAML sequence. Elements are handed back to the session,
/// so `T` needs its own registered converter.
pub struct SequenceConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SequenceConverter<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SequenceConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SequenceConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceConverter<{}>", type_name::<T>())
    }
}

impl<T: Any + Send> TypedConverter for SequenceConverter<T> {
    type Value = Vec<T>;

    // elements can only be resolved through a session
    fn write_yaml(&self, _writer: &mut YamlWriter, _value: &Vec<T>) -> Result<()> {
        Err(Error::NoConverter(type_name::<T>()))
    }

    fn read_yaml(&self, _reader: &mut YamlReader<'_>, _ty: &TypeInfo) -> Result<Vec<T>> {
        Err(Error::NoConverter(type_name::<T>()))
    }

    fn write_yaml_with(
        &self,
        writer: &mut YamlWriter,
        value: &Vec<T>,
        serializer: &mut dyn ContextSerializer,
    ) -> Result<()> {
        writer.begin_sequence()?;
        for item in value {
            serializer.serialize(writer, item)?;
        }
        writer.end_sequence()
    }

    fn read_yaml_with(
        &self,
        reader: &mut YamlReader<'_>,
        _ty: &TypeInfo,
        deserializer: &mut dyn ContextDeserializer,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        reader.begin_sequence()?;
        while !reader.end_sequence()? {
            items.push(deserializer.deserialize::<T>(reader)?);
        }
        Ok(items)
    }
}

use crate::{Error, Result, TypeInfo, YamlReader, YamlWriter};

use std::any::Any;

pub trait ContextSerializer {
    fn serialize_value(
        &mut self,
        writer: &mut YamlWriter,
        value: &dyn Any,
        ty: &TypeInfo,
    ) -> Result<()>;
}

pub trait ContextDeserializer {
    fn deserialize_value(
        &mut self,
        reader: &mut YamlReader<'_>,
        ty: &TypeInfo,
    ) -> Result<Box<dyn Any + Send>>;
}

impl<'a> dyn ContextSerializer + 'a {
    pub fn serialize<T: Any>(&mut self, writer: &mut YamlWriter, value: &T) -> Result<()> {
        self.serialize_value(writer, value, &TypeInfo::of::<T>())
    }
}

impl<'a> dyn ContextDeserializer + 'a {
    pub fn deserialize<T: Any>(&mut self, reader: &mut YamlReader<'_>) -> Result<T> {
        let ty = TypeInfo::of::<T>();
        let value = self.deserialize_value(reader, &ty)?;
        downcast_value(value, &ty)
    }
}

pub(crate) fn downcast_value<T: Any>(value: Box<dyn Any + Send>, ty: &TypeInfo) -> Result<T> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| Error::TypeMismatch {
            expected: ty.name(),
            found: "converter output of another type",
        })
}

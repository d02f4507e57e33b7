use crate::{
    ContextDeserializer, ContextSerializer, ConverterRegistry, Error, Result, TypeInfo,
    YamlConverter, YamlReader, YamlWriter,
};

use std::any::Any;

pub(crate) struct Session<'f> {
    registry: &'f ConverterRegistry,
    max_depth: usize,
    depth: usize,
}

impl<'f> Session<'f> {
    pub(crate) fn new(registry: &'f ConverterRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            max_depth,
            depth: 0,
        }
    }

    fn resolve(&self, ty: &TypeInfo) -> Result<&'f dyn YamlConverter> {
        let registry = self.registry;
        registry.find(ty).ok_or(Error::NoConverter(ty.name()))
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }
}

impl ContextSerializer for Session<'_> {
    fn serialize_value(
        &mut self,
        writer: &mut YamlWriter,
        value: &dyn Any,
        ty: &TypeInfo,
    ) -> Result<()> {
        let converter = self.resolve(ty)?;
        self.enter()?;
        tracing::debug!(converter = converter.name(), ty = %ty, depth = self.depth, "dispatching write");

        let result = converter.write(writer, value, ty, self);
        self.depth -= 1;
        result
    }
}

impl ContextDeserializer for Session<'_> {
    fn deserialize_value(
        &mut self,
        reader: &mut YamlReader<'_>,
        ty: &TypeInfo,
    ) -> Result<Box<dyn Any + Send>> {
        let converter = self.resolve(ty)?;
        self.enter()?;
        tracing::debug!(converter = converter.name(), ty = %ty, depth = self.depth, "dispatching read");

        let result = converter.read(reader, ty, self);
        self.depth -= 1;
        result
    }
}

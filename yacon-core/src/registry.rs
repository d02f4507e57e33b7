use crate::{TypeInfo, YamlConverter};

use std::fmt;

/// Ordered set of converters. Lookup walks the list in registration order
/// and the first converter that accepts the type wins.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn YamlConverter>>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.converters.iter().map(|c| c.name()))
            .finish()
    }
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, converter: impl YamlConverter + 'static) -> &mut Self {
        self.add_boxed(Box::new(converter))
    }

    pub fn add_boxed(&mut self, converter: Box<dyn YamlConverter>) -> &mut Self {
        tracing::trace!(converter = converter.name(), position = self.converters.len(), "registered converter");
        self.converters.push(converter);
        self
    }

    /// Inserts ahead of the converter currently at `index`, so it takes
    /// precedence over it. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, converter: impl YamlConverter + 'static) -> &mut Self {
        tracing::trace!(converter = converter.name(), position = index, "registered converter");
        self.converters.insert(index, Box::new(converter));
        self
    }

    pub fn find(&self, ty: &TypeInfo) -> Option<&dyn YamlConverter> {
        self.converters
            .iter()
            .find(|c| c.can_convert(ty))
            .map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn YamlConverter> {
        self.converters.iter().map(|c| c.as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn YamlConverter>> {
        self.converters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

use crate::{
    ContextDeserializer, ContextSerializer, ConverterRegistry, Error, Result, TypeInfo,
    YamlConverter, YamlReader, YamlWriter, context::downcast_value, session::Session,
};

use std::{
    any::Any,
    io::{Read, Write},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use yaml_rust::{Yaml, YamlEmitter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlFormatterOptions {
    /// Keep the leading `---` the emitter writes.
    pub document_start_marker: bool,
    pub trailing_newline: bool,
    /// Upper bound on nested converter dispatch within one document.
    pub max_depth: usize,
    pub float_precision: Option<usize>,
}

impl Default for YamlFormatterOptions {
    fn default() -> Self {
        Self {
            document_start_marker: false,
            trailing_newline: true,
            max_depth: 64,
            float_precision: None,
        }
    }
}

/// Serializes and deserializes values through the registered converters.
///
/// Every call runs its own session, so one formatter can be shared across
/// threads.
#[derive(Debug, Default)]
pub struct YamlFormatter {
    options: Arc<YamlFormatterOptions>,
    converters: ConverterRegistry,
}

impl YamlFormatter {
    pub fn new(options: YamlFormatterOptions) -> Self {
        Self {
            options: Arc::new(options),
            converters: ConverterRegistry::new(),
        }
    }

    pub fn options(&self) -> &Arc<YamlFormatterOptions> {
        &self.options
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn with_converter(mut self, converter: impl YamlConverter + 'static) -> Self {
        self.add_converter(converter);
        self
    }

    pub fn add_converter(&mut self, mut converter: impl YamlConverter + 'static) -> &mut Self {
        converter.set_formatter(Some(self.options.clone()));
        self.converters.add(converter);
        self
    }

    pub fn set_options(&mut self, options: YamlFormatterOptions) {
        self.options = Arc::new(options);
        for converter in self.converters.iter_mut() {
            converter.set_formatter(Some(self.options.clone()));
        }
    }

    pub fn serialize<T: Any>(&self, value: &T) -> Result<String> {
        let mut writer = YamlWriter::new();
        let mut session = Session::new(&self.converters, self.options.max_depth);
        session.serialize_value(&mut writer, value, &TypeInfo::of::<T>())?;

        let root = writer.finish()?;
        self.render(&root)
    }

    pub fn deserialize<T: Any>(&self, input: &str) -> Result<T> {
        let mut reader = YamlReader::new(input);
        if !reader.begin_document()? {
            return Err(Error::EmptyDocument);
        }

        let ty = TypeInfo::of::<T>();
        let mut session = Session::new(&self.converters, self.options.max_depth);
        let value = session.deserialize_value(&mut reader, &ty)?;
        reader.end_document()?;

        downcast_value(value, &ty)
    }

    pub fn serialize_to_writer<T: Any, W: Write>(&self, value: &T, mut writer: W) -> Result<()> {
        let text = self.serialize(value)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn deserialize_from_reader<T: Any, R: Read>(&self, mut reader: R) -> Result<T> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        self.deserialize(&input)
    }

    pub async fn serialize_to_async_writer<T, W>(&self, value: &T, writer: &mut W) -> Result<()>
    where
        T: Any,
        W: AsyncWrite + Unpin,
    {
        let text = self.serialize(value)?;
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    pub async fn deserialize_from_async_reader<T, R>(&self, reader: &mut R) -> Result<T>
    where
        T: Any,
        R: AsyncRead + Unpin,
    {
        let mut input = String::new();
        reader.read_to_string(&mut input).await?;
        self.deserialize(&input)
    }

    fn render(&self, root: &Yaml) -> Result<String> {
        let mut out = String::new();
        {
            let mut emitter = YamlEmitter::new(&mut out);
            emitter
                .dump(root)
                .map_err(|e| Error::Emit(format!("{e:?}")))?;
        }

        if !self.options.document_start_marker {
            if let Some(rest) = out.strip_prefix("---") {
                out = rest.strip_prefix(['\n', ' ']).unwrap_or(rest).to_owned();
            }
        }

        if self.options.trailing_newline {
            if !out.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.truncate(out.trim_end_matches('\n').len());
        }

        Ok(out)
    }
}

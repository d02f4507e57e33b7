use crate::{Error, Result};

use std::{fmt, str::Chars};

use yaml_rust::{Event, Yaml, parser::Parser, scanner::TScalarStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Alias,
    SequenceEnd,
    MappingEnd,
    /// Stream or document start/end.
    Boundary,
}

impl NodeKind {
    fn of(event: &Event) -> Self {
        match event {
            Event::Scalar(..) => NodeKind::Scalar,
            Event::SequenceStart(..) => NodeKind::Sequence,
            Event::MappingStart(..) => NodeKind::Mapping,
            Event::Alias(..) => NodeKind::Alias,
            Event::SequenceEnd => NodeKind::SequenceEnd,
            Event::MappingEnd => NodeKind::MappingEnd,
            _ => NodeKind::Boundary,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            NodeKind::Scalar => "a scalar",
            NodeKind::Sequence => "a sequence",
            NodeKind::Mapping => "a mapping",
            NodeKind::Alias => "an alias (anchors are not resolved)",
            NodeKind::SequenceEnd => "the end of a sequence",
            NodeKind::MappingEnd => "the end of a mapping",
            NodeKind::Boundary => "a document boundary",
        }
    }
}

fn is_null_literal(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}

/// Pull cursor over the YAML event stream.
///
/// Converters borrow the reader for one `read` call and must consume
/// exactly the events of the node they return. Document framing is handled
/// by the formatter.
pub struct YamlReader<'a> {
    parser: Parser<Chars<'a>>,
    line: usize,
    col: usize,
}

impl fmt::Debug for YamlReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlReader")
            .field("line", &self.line)
            .field("col", &self.col)
            .finish_non_exhaustive()
    }
}

impl<'a> YamlReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            parser: Parser::new(input.chars()),
            line: 0,
            col: 0,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    pub fn peek(&mut self) -> Result<&Event> {
        let (event, _) = self.parser.peek()?;
        Ok(event)
    }

    pub fn peek_kind(&mut self) -> Result<NodeKind> {
        Ok(NodeKind::of(self.peek()?))
    }

    pub fn next_event(&mut self) -> Result<Event> {
        let (event, marker) = self.parser.next()?;
        self.line = marker.line();
        self.col = marker.col();
        Ok(event)
    }

    /// Builds a format error pointing at the last consumed event.
    pub fn format_error(&self, message: impl Into<String>) -> Error {
        Error::Format {
            message: message.into(),
            line: self.line,
            col: self.col,
        }
    }

    fn unexpected(&self, expected: &str, found: &Event) -> Error {
        self.format_error(format!(
            "expected {expected}, found {}",
            NodeKind::of(found).describe()
        ))
    }

    pub fn read_scalar(&mut self) -> Result<String> {
        match self.next_event()? {
            Event::Scalar(value, ..) => Ok(value),
            other => Err(self.unexpected("a scalar", &other)),
        }
    }

    pub fn read_plain_scalar(&mut self) -> Result<String> {
        match self.next_event()? {
            Event::Scalar(value, TScalarStyle::Plain, ..) => Ok(value),
            Event::Scalar(..) => Err(self.format_error("expected a plain scalar, found a quoted one")),
            other => Err(self.unexpected("a plain scalar", &other)),
        }
    }

    /// Next scalar resolved with the core schema. Quoted scalars are
    /// always strings.
    pub fn read_typed_scalar(&mut self) -> Result<Yaml> {
        match self.next_event()? {
            Event::Scalar(value, TScalarStyle::Plain, ..) => Ok(Yaml::from_str(&value)),
            Event::Scalar(value, ..) => Ok(Yaml::String(value)),
            other => Err(self.unexpected("a scalar", &other)),
        }
    }

    pub fn is_null(&mut self) -> Result<bool> {
        Ok(matches!(
            self.peek()?,
            Event::Scalar(value, TScalarStyle::Plain, ..) if is_null_literal(value)
        ))
    }

    pub fn read_null(&mut self) -> Result<()> {
        match self.next_event()? {
            Event::Scalar(value, TScalarStyle::Plain, ..) if is_null_literal(&value) => Ok(()),
            other => Err(self.unexpected("null", &other)),
        }
    }

    pub fn begin_sequence(&mut self) -> Result<()> {
        match self.next_event()? {
            Event::SequenceStart(..) => Ok(()),
            other => Err(self.unexpected("a sequence", &other)),
        }
    }

    pub fn end_sequence(&mut self) -> Result<bool> {
        self.consume_if(NodeKind::SequenceEnd)
    }

    pub fn begin_mapping(&mut self) -> Result<()> {
        match self.next_event()? {
            Event::MappingStart(..) => Ok(()),
            other => Err(self.unexpected("a mapping", &other)),
        }
    }

    pub fn end_mapping(&mut self) -> Result<bool> {
        self.consume_if(NodeKind::MappingEnd)
    }

    fn consume_if(&mut self, kind: NodeKind) -> Result<bool> {
        if self.peek_kind()? != kind {
            return Ok(false);
        }
        self.next_event()?;
        Ok(true)
    }

    pub fn skip_value(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let event = self.next_event()?;
            match NodeKind::of(&event) {
                NodeKind::Scalar | NodeKind::Alias => {}
                NodeKind::Sequence | NodeKind::Mapping => depth += 1,
                NodeKind::SequenceEnd | NodeKind::MappingEnd if depth > 0 => depth -= 1,
                _ => return Err(self.unexpected("a value", &event)),
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Moves past the stream and document start. Returns `false` when the
    /// stream holds no document at all.
    pub(crate) fn begin_document(&mut self) -> Result<bool> {
        loop {
            match self.next_event()? {
                Event::StreamStart => continue,
                Event::DocumentStart => return Ok(true),
                Event::StreamEnd => return Ok(false),
                other => return Err(self.unexpected("the start of a document", &other)),
            }
        }
    }

    pub(crate) fn end_document(&mut self) -> Result<()> {
        match self.next_event()? {
            Event::DocumentEnd => {}
            other => return Err(self.unexpected("the end of the document", &other)),
        }

        match self.next_event()? {
            Event::StreamEnd => Ok(()),
            Event::DocumentStart => {
                Err(self.format_error("expected a single document, found another one"))
            }
            other => Err(self.unexpected("the end of the stream", &other)),
        }
    }
}

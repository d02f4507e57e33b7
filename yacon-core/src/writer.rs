use crate::{Error, Result};

use yaml_rust::{Yaml, yaml::Hash};

#[derive(Debug)]
enum Frame {
    Sequence(Vec<Yaml>),
    Mapping { entries: Hash, key: Option<Yaml> },
}

/// Event sink for one emitted document.
///
/// Nodes are written in document order. Inside a mapping, writes alternate
/// between key and value. Once the root node is complete nothing more can
/// be written.
#[derive(Debug, Default)]
pub struct YamlWriter {
    stack: Vec<Frame>,
    root: Option<Yaml>,
}

impl YamlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_node(&mut self, node: Yaml) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Sequence(items)) => items.push(node),
            Some(Frame::Mapping { entries, key }) => match key.take() {
                Some(key) => {
                    if entries.contains_key(&key) {
                        return Err(Error::Emit(format!("duplicate mapping key {key:?}")));
                    }
                    entries.insert(key, node);
                }
                None => *key = Some(node),
            },
            None => {
                if self.root.is_some() {
                    return Err(Error::Emit("root node already written".into()));
                }
                self.root = Some(node);
            }
        }
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.write_node(Yaml::Null)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_node(Yaml::Boolean(value))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_node(Yaml::Integer(value))
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        match i64::try_from(value) {
            Ok(value) => self.write_i64(value),
            Err(_) => self.write_plain(&value.to_string()),
        }
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_plain(&float_text(value))
    }

    /// Writes `text` verbatim as an unquoted scalar.
    pub fn write_plain(&mut self, text: &str) -> Result<()> {
        self.write_node(Yaml::Real(text.to_owned()))
    }

    /// Writes a string scalar. Text that a plain scalar would resolve to
    /// another type is always single quoted.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        match Yaml::from_str(value) {
            Yaml::String(_) => self.write_node(Yaml::String(value.to_owned())),
            // the emitter leaves forms like `0o17` and `+.inf` bare
            _ => self.write_plain(&format!("'{}'", value.replace('\'', "''"))),
        }
    }

    pub fn begin_sequence(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.stack.push(Frame::Sequence(Vec::new()));
        Ok(())
    }

    pub fn end_sequence(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Sequence(items)) => self.write_node(Yaml::Array(items)),
            _ => Err(Error::Emit("end of sequence without a matching start".into())),
        }
    }

    pub fn begin_mapping(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.stack.push(Frame::Mapping {
            entries: Hash::new(),
            key: None,
        });
        Ok(())
    }

    pub fn end_mapping(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Mapping { key: Some(key), .. }) => {
                Err(Error::Emit(format!("mapping key {key:?} has no value")))
            }
            Some(Frame::Mapping { entries, .. }) => self.write_node(Yaml::Hash(entries)),
            _ => Err(Error::Emit("end of mapping without a matching start".into())),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stack.is_empty() && self.root.is_some()
    }

    pub fn finish(self) -> Result<Yaml> {
        if !self.stack.is_empty() {
            return Err(Error::Emit(format!(
                "{} collection(s) left open",
                self.stack.len()
            )));
        }
        self.root
            .ok_or_else(|| Error::Emit("no node was written".into()))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::Emit("root node already written".into()));
        }
        Ok(())
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        return ".nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.into();
    }

    let mut text = value.to_string();
    // keep it a float on the way back in
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

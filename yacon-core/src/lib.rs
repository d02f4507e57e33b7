pub mod error;
pub use error::{Result, Error};

pub mod type_info;
pub use type_info::TypeInfo;

pub mod converter;
pub use converter::{Converter, TypedConverter, YamlConverter};

pub mod context;
pub use context::{ContextDeserializer, ContextSerializer};

pub mod reader;
pub use reader::{NodeKind, YamlReader};

pub mod writer;
pub use writer::YamlWriter;

pub mod registry;
pub use registry::ConverterRegistry;

pub mod formatter;
pub use formatter::{YamlFormatter, YamlFormatterOptions};

mod session;

pub use serde;
pub use yaml_rust;

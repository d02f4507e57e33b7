#![warn(missing_debug_implementations)]

pub use serde::{Serialize, de::DeserializeOwned as Deserialize};

mod scalar;
pub use scalar::{BoolConverter, F64Converter, I32Converter, I64Converter, StringConverter, U64Converter};

mod nullable;
pub use nullable::NullableConverter;

mod sequence;
pub use sequence::SequenceConverter;

mod json;
pub use json::{JsonValueConverter, SerdeConverter};

mod options;
pub use options::{default_formatter, load_options};

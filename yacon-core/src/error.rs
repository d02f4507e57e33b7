use yaml_rust::ScanError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Format error at line {line}, column {col}: {message}")]
    Format {
        message: String,
        line: usize,
        col: usize,
    },

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Emit error: {0}")]
    Emit(String),

    #[error("No converter registered for {0}")]
    NoConverter(&'static str),

    #[error("Nesting depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),

    #[error("Empty document")]
    EmptyDocument,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SerializeError: {0}")]
    SerializeError(String),

    #[error("DeserializeError: {0}")]
    DeserializeError(String),
}

use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    /// Snapshot file could not be read.
    Io(String),
    /// Snapshot contents could not be deserialized.
    Parse(String),
    /// File extension is neither `.json` nor `.toml`.
    UnsupportedFormat(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported catalog format: '{ext}'"),
        }
    }
}

impl std::error::Error for CatalogError {}

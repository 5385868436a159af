use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported format for '{name}': {mime}")]
    UnsupportedFormat { name: String, mime: String },

    #[error("Corrupt document '{name}': {detail}")]
    CorruptDocument { name: String, detail: String },

    #[error("Document '{name}' contains no extractable text")]
    EmptyDocument { name: String },

    #[error("A document named '{name}' is already in the batch")]
    DuplicateFilename { name: String },

    #[error("No files submitted")]
    NoFiles,

    #[error("No similarity matrix computed for the current batch")]
    NoData,

    #[error("Document '{name}' exceeds the size limit ({bytes} > {limit} bytes)")]
    ResourceExceeded { name: String, bytes: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Report error: {0}")]
    Report(String),
}

impl Error {
    /// Filename the error identifies, if it concerns a single document.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Error::UnsupportedFormat { name, .. }
            | Error::CorruptDocument { name, .. }
            | Error::EmptyDocument { name }
            | Error::DuplicateFilename { name }
            | Error::ResourceExceeded { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Report(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(err.to_string())
    }
}

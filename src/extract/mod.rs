use crate::error::Error;

mod docx;
mod pdf;
mod text;

/// Accepted document formats. The set is fixed and exhaustive; anything
/// else is a client-input error rejected before a file enters the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Map a declared MIME type to a format. Parameters after ';' are
    /// ignored (`text/plain; charset=utf-8` is still plain text).
    pub fn from_mime(mime: &str) -> Option<DocumentFormat> {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            "application/pdf" => Some(DocumentFormat::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentFormat::Docx)
            }
            "text/plain" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    /// Format for a file path, used by the CLI front end where only an
    /// extension is available.
    pub fn from_extension(ext: &str) -> Option<DocumentFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::PlainText => "text/plain",
        }
    }
}

/// Extract plain text from a document's raw bytes.
///
/// Fails with `CorruptDocument` when the parser cannot read the container
/// and `EmptyDocument` when extraction succeeds but yields no
/// non-whitespace characters. Unsupported formats never reach this point.
pub fn extract_text(name: &str, format: DocumentFormat, bytes: &[u8]) -> Result<String, Error> {
    let extracted = match format {
        DocumentFormat::Pdf => pdf::extract(name, bytes)?,
        DocumentFormat::Docx => docx::extract(name, bytes)?,
        DocumentFormat::PlainText => text::extract(bytes),
    };

    if extracted.chars().all(char::is_whitespace) {
        return Err(Error::EmptyDocument {
            name: name.to_string(),
        });
    }

    Ok(extracted)
}

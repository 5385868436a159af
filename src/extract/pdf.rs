use crate::error::Error;

/// Extract text from all pages in page order. `pdf_extract` walks the page
/// tree front to back and concatenates page text for us.
pub fn extract(name: &str, bytes: &[u8]) -> Result<String, Error> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|err| Error::CorruptDocument {
        name: name.to_string(),
        detail: err.to_string(),
    })
}

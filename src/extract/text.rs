/// Plain text is decoded as-is. Invalid UTF-8 sequences are replaced
/// rather than rejected, matching lenient text-file handling elsewhere in
/// the pipeline (a stray byte should not fail a whole document).
pub fn extract(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

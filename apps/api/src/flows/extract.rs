//! PDF text extraction for the import flow. Extraction happens entirely in
//! memory; the upload is never written to disk.

use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF. A PDF that yields no text at
/// all (scanned images, empty file) is an extraction failure, not an empty
/// parse.
pub fn pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "PDF contained no extractable text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_an_extraction_error() {
        let err = pdf_text(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}

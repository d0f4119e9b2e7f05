//! Upload decoding: turns uploaded bytes into analysable text.

use std::panic;
use std::path::Path;

use tracing::warn;

/// Upload formats the service can read text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" | "md" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::PlainText => "text/plain; charset=utf-8",
        }
    }
}

/// Decodes the upload. `None` means no usable text: undecodable bytes or only
/// whitespace.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Option<String> {
    let text = match format {
        // pdf-extract panics on some malformed inputs.
        DocumentFormat::Pdf => match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("PDF text extraction failed: {e}");
                return None;
            }
            Err(_) => {
                warn!("PDF text extraction panicked");
                return None;
            }
        },
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(DocumentFormat::from_filename("cv.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(
            DocumentFormat::from_filename("notes.txt"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_filename("resume.docx"), None);
        assert_eq!(DocumentFormat::from_filename("no_extension"), None);
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = extract_text(DocumentFormat::PlainText, b"  hello world \n").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_blank_upload_has_no_text() {
        assert_eq!(extract_text(DocumentFormat::PlainText, b" \n\t "), None);
    }

    #[test]
    fn test_garbage_pdf_has_no_text() {
        assert_eq!(extract_text(DocumentFormat::Pdf, b"definitely not a pdf"), None);
    }
}

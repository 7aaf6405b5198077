//! Document text extraction: uploaded bytes in, plain text and ordered
//! paragraphs out. Pure transformations, no state.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::resume::Paragraph;

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse PDF file: {0}")]
    Pdf(String),

    #[error("Failed to parse DOCX file: {0}")]
    Docx(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

pub fn is_supported(mime_type: &str) -> bool {
    matches!(mime_type, PDF_MIME | DOCX_MIME)
}

/// Dispatches on the declared MIME type. Unsupported types are rejected
/// before this point by the upload handler; the error here is a backstop.
pub fn extract_text(data: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
    match mime_type {
        PDF_MIME => pdf::extract_text(data),
        DOCX_MIME => docx::extract_text(data),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

/// Splits text on blank-line boundaries into ordered paragraphs. Segments
/// are trimmed and empty ones dropped, so `order` runs 0..n with no gaps.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    paragraph_breaks()
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(order, segment)| Paragraph {
            text: segment.to_string(),
            order: order as i32,
        })
        .collect()
}

/// Best-effort: the first RFC-shaped address anywhere in the text. Not
/// validated for deliverability.
pub fn extract_email(text: &str) -> Option<String> {
    email_pattern().find(text).map(|m| m.as_str().to_string())
}

fn paragraph_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("hardcoded paragraph regex"))
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("hardcoded email regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_orders_paragraphs_from_zero() {
        let text = "First paragraph.\n\nSecond paragraph.\n\n\nThird paragraph.";
        let paragraphs = split_paragraphs(text);

        assert_eq!(paragraphs.len(), 3);
        for (i, p) in paragraphs.iter().enumerate() {
            assert_eq!(p.order, i as i32);
        }
        assert_eq!(paragraphs[0].text, "First paragraph.");
        assert_eq!(paragraphs[2].text, "Third paragraph.");
    }

    #[test]
    fn split_trims_and_drops_empty_segments() {
        let text = "  one  \n\n   \n\n two ";
        let paragraphs = split_paragraphs(text);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "one");
        assert_eq!(paragraphs[1].text, "two");
    }

    #[test]
    fn split_keeps_single_newlines_together() {
        let text = "line one\nline two\n\nnext paragraph";
        let paragraphs = split_paragraphs(text);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "line one\nline two");
    }

    #[test]
    fn split_of_empty_text_is_empty() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("   \n\n  ").is_empty());
    }

    #[test]
    fn extracts_first_email() {
        let text = "Jane Doe\njane.doe+jobs@example.com\nother@example.org";
        assert_eq!(
            extract_email(text),
            Some("jane.doe+jobs@example.com".to_string())
        );
    }

    #[test]
    fn no_email_yields_none() {
        assert_eq!(extract_email("No contact details here."), None);
        assert_eq!(extract_email("not-an-email @ nowhere"), None);
    }

    #[test]
    fn unsupported_mime_is_rejected() {
        let err = extract_text(b"plain", "text/plain").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(_)));
    }
}

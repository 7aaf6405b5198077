use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use super::ExtractionError;

/// Extracts raw text in one pass: text runs concatenated per paragraph,
/// paragraphs separated by blank lines so the downstream split sees them.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(data).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push_str("\n\n");
        }
    }

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bytes_are_an_error() {
        let err = extract_text(b"not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }
}

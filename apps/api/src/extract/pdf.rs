use lopdf::Document;
use tracing::warn;

use super::ExtractionError;

/// Extracts text page by page. A page that fails to parse is skipped and
/// extraction continues; only a document that cannot be opened is an error.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let mut full_text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                full_text.push_str(&page_text);
                full_text.push('\n');
            }
            Err(e) => {
                warn!("skipping unparseable PDF page {page_num}: {e}");
            }
        }
    }

    Ok(full_text.trim().to_string())
}

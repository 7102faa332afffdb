use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// UTF-8 text, falling back to Latin-1 so decoding never fails.
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    pub fn decode(data: &[u8]) -> String {
        match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(_) => {
                tracing::debug!(bytes = data.len(), "Text is not valid UTF-8, decoding as Latin-1");
                data.iter().map(|&b| char::from(b)).collect()
            }
        }
    }
}

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        Ok(Self::decode(data))
    }
}

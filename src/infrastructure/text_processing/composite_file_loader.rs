use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

pub struct CompositeFileLoader {
    adapters: HashMap<DocumentFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(DocumentFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text, Word and PDF adapters.
    pub fn with_default_adapters() -> Self {
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new());
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());

        Self::new(vec![
            (DocumentFormat::Text, text),
            (DocumentFormat::Docx, docx),
            (DocumentFormat::Pdf, pdf),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.format).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(document.format.extension().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}

use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

const DOCUMENT_PART: &str = "word/document.xml";

/// Word documents: body paragraph texts joined with single spaces. Table
/// cells, text boxes, headers and footers are not part of the body paragraph list.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to open docx: {e}")))?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    /// Text of every body-level paragraph in document order. Paragraphs in
    /// tables, text boxes and alternate-content fallbacks are skipped, and a
    /// text box anchored in a body paragraph leaves that paragraph's own runs intact.
    pub fn paragraphs(xml: &str) -> Result<Vec<String>, FileLoaderError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        let mut paragraph_depth = 0usize;
        let mut table_depth = 0usize;
        let mut nested_depth = 0usize;
        let mut run_depth = 0usize;
        let mut in_text = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                FileLoaderError::ExtractionFailed(format!(
                    "malformed document xml at {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            let collecting = nested_depth == 0 && run_depth > 0;

            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:tbl" => table_depth += 1,
                    b"w:txbxContent" | b"mc:Fallback" => nested_depth += 1,
                    b"w:p" => {
                        paragraph_depth += 1;
                        if paragraph_depth == 1 && table_depth == 0 && nested_depth == 0 {
                            current = Some(String::new());
                        }
                    }
                    b"w:r" => run_depth += 1,
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match (e.name().as_ref(), current.as_mut()) {
                    (b"w:p", None)
                        if paragraph_depth == 0 && table_depth == 0 && nested_depth == 0 =>
                    {
                        paragraphs.push(String::new())
                    }
                    (b"w:tab", Some(text)) if collecting => text.push('\t'),
                    (b"w:br" | b"w:cr", Some(text)) if collecting => text.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text && collecting => {
                    if let Some(text) = current.as_mut() {
                        let unescaped = t.unescape().map_err(|e| {
                            FileLoaderError::ExtractionFailed(format!("bad text run: {e}"))
                        })?;
                        text.push_str(&unescaped);
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                    b"w:txbxContent" | b"mc:Fallback" => {
                        nested_depth = nested_depth.saturating_sub(1)
                    }
                    b"w:p" => {
                        if paragraph_depth == 1 {
                            if let Some(text) = current.take() {
                                paragraphs.push(text);
                            }
                        }
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                    }
                    b"w:r" => run_depth = run_depth.saturating_sub(1),
                    b"w:t" => in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            size_bytes = document.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let xml = Self::read_document_part(data)?;
        let paragraphs = Self::paragraphs(&xml)?;
        tracing::info!(paragraph_count = paragraphs.len(), "DOCX text extraction complete");

        Ok(paragraphs.join(" "))
    }
}

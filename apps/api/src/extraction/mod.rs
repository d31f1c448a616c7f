//! Text extraction: decodes an uploaded resume file into plain UTF-8 text.
//!
//! PDFs go through `pdf-extract`. DOCX files are unzipped and the body text is
//! read out of `word/document.xml`. Every other format, and any document that
//! fails to decode, falls back to a lossy UTF-8 read of the raw bytes. Callers
//! always get a string back; the analysis core never sees binary data.
//!
//! Decoding is CPU-bound. Call this from `tokio::task::spawn_blocking`.

use std::io::{Cursor, Read};
use std::panic::{catch_unwind, AssertUnwindSafe};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, warn};

const DOCX_BODY_ENTRY: &str = "word/document.xml";

/// An uploaded document as received from the client.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

#[derive(Debug, Error)]
enum ExtractionError {
    #[error("pdf decoder panicked")]
    PdfPanic,
    #[error("pdf decode error: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
    #[error("docx archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("docx read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("docx xml error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for ExtractionError {
    fn from(e: quick_xml::Error) -> Self {
        ExtractionError::Xml(e.to_string())
    }
}

impl UploadedFile {
    /// Mime type wins; the file extension is consulted when the mime type is
    /// missing or generic.
    pub fn kind(&self) -> DocumentKind {
        let mime = self.content_type.as_deref().unwrap_or_default().to_lowercase();
        let name = self.file_name.as_deref().unwrap_or_default().to_lowercase();
        if mime.contains("pdf") || name.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if mime.contains("word") || mime.contains("officedocument") || name.ends_with(".docx")
        {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }
}

/// Extracts text from an uploaded file. Never fails.
pub fn extract_text(file: &UploadedFile) -> String {
    let decoded = match file.kind() {
        DocumentKind::Pdf => extract_pdf(&file.bytes),
        DocumentKind::Docx => extract_docx(&file.bytes),
        DocumentKind::PlainText => return decode_raw(&file.bytes),
    };
    match decoded {
        Ok(text) => {
            debug!(chars = text.len(), kind = ?file.kind(), "Extracted document text");
            text
        }
        Err(e) => {
            warn!(error = %e, file = ?file.file_name, "Document extraction failed, falling back to raw bytes");
            decode_raw(&file.bytes)
        }
    }
}

/// `pdf-extract` panics on some malformed-but-parseable inputs (fonts without
/// a subtype, broken encodings), so the call is isolated behind `catch_unwind`.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(result) => Ok(result?),
        Err(_) => Err(ExtractionError::PdfPanic),
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_ENTRY)?.read_to_string(&mut xml)?;
    docx_body_text(&xml)
}

/// Walks the WordprocessingML body: `w:t` runs carry text, each `w:p` ends a
/// line, `w:tab` and `w:br` map to a tab and a newline.
fn docx_body_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.decode().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                out.push_str(&text);
            }
            Event::GeneralRef(e) if in_text => {
                let name = e.decode().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                match resolve_entity(&name) {
                    Some(c) => out.push(c),
                    None => warn!(entity = %name, "Unknown entity in DOCX body"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn decode_raw(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

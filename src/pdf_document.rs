/*!
 * PDF document access.
 *
 * Wraps `lopdf` behind the [`PageSource`] trait so the translation loop only
 * sees a page count and per-page text.
 */

use std::path::{Path, PathBuf};

use log::debug;
use lopdf::Document;

use crate::errors::AppError;

/// An ordered, read-only sequence of pages with extractable text
pub trait PageSource {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Embedded text of the page at the zero-based `index`.
    ///
    /// Pages whose content cannot be decoded yield an empty string.
    fn extract_text(&self, index: usize) -> String;
}

/// A PDF file loaded with lopdf
pub struct PdfDocument {
    /// Path the document was loaded from, needed again for OCR rendering
    path: PathBuf,
    /// Parsed document
    document: Document,
    /// Page numbers (1-based, as lopdf keys them) in document order
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    /// Load and parse a PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let document = Document::load(path)
            .map_err(|e| AppError::Pdf(format!("Failed to load {}: {}", path.display(), e)))?;
        let page_numbers = document.get_pages().into_keys().collect();

        Ok(Self {
            path: path.to_path_buf(),
            document,
            page_numbers,
        })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn extract_text(&self, index: usize) -> String {
        let Some(&page_number) = self.page_numbers.get(index) else {
            return String::new();
        };

        match self.document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                debug!("No extractable text on page {}: {}", page_number, e);
                String::new()
            }
        }
    }
}

/// Where the text of a page came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// Embedded text extracted from the content stream
    Extracted,
    /// Recognized from a rendered image of the page
    Ocr,
}

/// Text resolved for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Zero-based page index
    pub index: usize,
    /// The page text, untrimmed
    pub text: String,
    /// How the text was obtained
    pub origin: TextOrigin,
}

impl PageText {
    /// Whether the page has nothing worth translating
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/*!
 * OCR fallback for pages without embedded text.
 *
 * Pages are rasterized with `pdftoppm` (poppler) and recognized with the
 * `tesseract` command line tool. Both binaries are probed once at startup.
 */

use std::path::Path;
use std::process::Command;

use log::{debug, warn};
use tempfile::tempdir;

use crate::app_config::OcrConfig;
use crate::errors::AppError;

/// Recognizes the text of a single rendered PDF page
pub trait OcrEngine {
    /// Run OCR on the zero-based `page_index` of the PDF at `pdf_path`
    fn recognize(&self, pdf_path: &Path, page_index: usize) -> Result<String, AppError>;
}

/// Result of probing for the external OCR tools
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OcrAvailability {
    /// Commands that could not be found
    pub missing: Vec<String>,
}

impl OcrAvailability {
    /// Probe the configured renderer and recognizer commands
    pub fn detect(config: &OcrConfig) -> Self {
        let missing = [&config.pdftoppm_cmd, &config.tesseract_cmd]
            .into_iter()
            .filter(|cmd| !command_exists(cmd))
            .cloned()
            .collect();

        Self { missing }
    }

    /// Whether every OCR dependency was found
    pub fn is_available(&self) -> bool {
        self.missing.is_empty()
    }
}

/// OCR backed by pdftoppm + tesseract
pub struct TesseractOcr {
    config: OcrConfig,
    availability: OcrAvailability,
}

impl TesseractOcr {
    /// Create an OCR engine, probing for its tools
    pub fn new(config: OcrConfig) -> Self {
        let availability = OcrAvailability::detect(&config);
        if !availability.is_available() {
            warn!(
                "OCR fallback unavailable (missing: {}); scanned pages will abort the run",
                availability.missing.join(", ")
            );
        }
        Self::with_availability(config, availability)
    }

    /// Create an OCR engine with an already known availability
    pub fn with_availability(config: OcrConfig, availability: OcrAvailability) -> Self {
        Self { config, availability }
    }

    /// Availability recorded at construction
    pub fn availability(&self) -> &OcrAvailability {
        &self.availability
    }

    fn render_page(&self, pdf_path: &Path, page_index: usize, out_prefix: &Path) -> Result<(), AppError> {
        let page_number = (page_index + 1).to_string();
        let output = Command::new(&self.config.pdftoppm_cmd)
            .arg("-r")
            .arg(self.config.dpi.to_string())
            .arg("-f")
            .arg(&page_number)
            .arg("-l")
            .arg(&page_number)
            .arg("-png")
            .arg("-singlefile")
            .arg(pdf_path)
            .arg(out_prefix)
            .output()
            .map_err(|e| AppError::Ocr(format!("failed to run {}: {}", self.config.pdftoppm_cmd, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Ocr(format!("pdftoppm failed: {}", stderr.trim())));
        }
        Ok(())
    }

    fn recognize_image(&self, image: &Path) -> Result<String, AppError> {
        let output = Command::new(&self.config.tesseract_cmd)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .output()
            .map_err(|e| AppError::Ocr(format!("failed to run {}: {}", self.config.tesseract_cmd, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Ocr(format!("tesseract failed: {}", stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, pdf_path: &Path, page_index: usize) -> Result<String, AppError> {
        if !self.availability.is_available() {
            return Err(AppError::OcrUnavailable(self.availability.missing.clone()));
        }

        let dir = tempdir()?;
        let prefix = dir.path().join("page");
        self.render_page(pdf_path, page_index, &prefix)?;

        // -singlefile writes exactly <prefix>.png
        let image = prefix.with_extension("png");
        let text = self.recognize_image(&image)?;
        debug!("OCR recognized {} chars on page {}", text.chars().count(), page_index + 1);
        Ok(text)
    }
}

fn command_exists(cmd: &str) -> bool {
    match Command::new(cmd).arg("-v").output() {
        Ok(_) => true,
        Err(err) => err.kind() != std::io::ErrorKind::NotFound,
    }
}

use log::{debug, info};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::language_utils;
use crate::ocr::{OcrEngine, TesseractOcr};
use crate::output::OutputWriter;
use crate::page_range;
use crate::pdf_document::{PageSource, PageText, PdfDocument, TextOrigin};
use crate::progress::{Progress, ProgressReporter};
use crate::translation::{TranslationService, Translator};

// @module: Application controller for PDF translation

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Pages selected by the page range
    pub selected: usize,
    /// Pages translated and written
    pub written: usize,
    /// Pages skipped because no text was found
    pub skipped: usize,
    /// Pages that needed the OCR fallback
    pub ocr_pages: usize,
    /// Wall time of the run
    pub elapsed: Duration,
}

/// The per-page loop: resolve text, translate, write, report.
pub struct PagePipeline<'a> {
    source: &'a dyn PageSource,
    pdf_path: &'a Path,
    ocr: &'a dyn OcrEngine,
    translator: &'a dyn Translator,
    source_language: &'a str,
    target_language: &'a str,
}

impl<'a> PagePipeline<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        pdf_path: &'a Path,
        ocr: &'a dyn OcrEngine,
        translator: &'a dyn Translator,
        source_language: &'a str,
        target_language: &'a str,
    ) -> Self {
        Self {
            source,
            pdf_path,
            ocr,
            translator,
            source_language,
            target_language,
        }
    }

    /// Get the text of a page, falling back to OCR when nothing is embedded
    pub fn resolve_page(&self, index: usize) -> Result<PageText, AppError> {
        let text = self.source.extract_text(index);
        if !text.trim().is_empty() {
            return Ok(PageText { index, text, origin: TextOrigin::Extracted });
        }

        debug!("Page {} has no embedded text, running OCR", index + 1);
        let text = self.ocr.recognize(self.pdf_path, index)?;
        Ok(PageText { index, text, origin: TextOrigin::Ocr })
    }

    /// Translate the selected pages in order, one output line per non-blank page.
    ///
    /// `on_progress` is called after every written page with the page's
    /// ordinal in the selection. Any error stops the run immediately.
    pub async fn run<F>(&self, indices: &[usize], writer: &mut OutputWriter, mut on_progress: F) -> Result<RunSummary, AppError>
    where
        F: FnMut(&Progress),
    {
        let total = indices.len();
        let mut summary = RunSummary { selected: total, ..RunSummary::default() };

        for (ordinal, &index) in indices.iter().enumerate() {
            let page = self.resolve_page(index)?;
            if page.origin == TextOrigin::Ocr {
                summary.ocr_pages += 1;
            }

            if page.is_blank() {
                debug!("Skipping page {}: no text found", index + 1);
                summary.skipped += 1;
                continue;
            }

            debug!("Translating page {} ({} chars, {:?})", index + 1, page.text.chars().count(), page.origin);
            let translated = self.translator
                .translate(&page.text, self.source_language, self.target_language)
                .await?;

            writer.write_page(&translated)?;
            summary.written += 1;

            on_progress(&Progress::new(ordinal + 1, total));
        }

        Ok(summary)
    }
}

/// Main application controller for PDF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Translate `input_file` into `output_file`
    pub async fn run(&self, input_file: &Path, output_file: &Path) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();

        // Everything that can be rejected up front is checked before the output is touched
        let range = page_range::parse_optional(self.config.pages.as_deref())?;
        let translator = TranslationService::new(&self.config.translation)?;

        if !input_file.is_file() {
            return Err(AppError::File(format!("Input file does not exist: {}", input_file.display())));
        }

        let ocr = TesseractOcr::new(self.config.ocr.clone());
        if ocr.availability().is_available() {
            debug!("OCR fallback ready ({} @ {} dpi)", self.config.ocr.language, self.config.ocr.dpi);
        }

        let document = PdfDocument::open(input_file)?;
        let indices = page_range::select_pages(range.as_ref(), document.page_count());

        info!("{} - {}: {} -> {}",
            translator.engine().display_name(),
            self.config.translation.get_model(),
            language_utils::describe_language(&self.config.source_language),
            language_utils::describe_language(&self.config.target_language));
        info!("Translating {} of {} pages from {}", indices.len(), document.page_count(), input_file.display());

        let mut writer = OutputWriter::create(output_file)?;
        let reporter = ProgressReporter::new(indices.len());

        let pipeline = PagePipeline::new(
            &document,
            document.path(),
            &ocr,
            &translator,
            &self.config.source_language,
            &self.config.target_language,
        );
        let result = pipeline.run(&indices, &mut writer, |progress| reporter.update(progress)).await;
        reporter.finish();

        let mut summary = result?;
        summary.elapsed = start_time.elapsed();

        info!(
            "Wrote {} pages to {} in {} ({} skipped, {} via OCR)",
            summary.written,
            writer.path().display(),
            Self::format_duration(summary.elapsed),
            summary.skipped,
            summary.ocr_pages
        );

        Ok(summary)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

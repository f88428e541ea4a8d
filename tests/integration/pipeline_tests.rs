/*!
 * Tests for the per-page translation loop
 */

use anyhow::Result;
use std::path::Path;

use pdftranx::app_config::Config;
use pdftranx::app_controller::{Controller, PagePipeline};
use pdftranx::errors::{AppError, ProviderError};
use pdftranx::ocr::{OcrAvailability, TesseractOcr};
use pdftranx::output::OutputWriter;
use pdftranx::pdf_document::TextOrigin;
use crate::common::mock_providers::{CountingOcr, FakePages, MockTranslator, TranslateCall};
use crate::common::{create_temp_dir, create_test_pdf, read_lines};

#[tokio::test]
async fn test_run_withThreeTextPages_shouldWriteThreeLinesAndReportProgress() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");
    let source = FakePages::new(&["Bonjour", "Le monde", "Fin"]);
    let ocr = CountingOcr::new();
    let translator = MockTranslator::new();

    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "fr", "zh-cn");
    let mut writer = OutputWriter::create(&output)?;
    let mut reported = Vec::new();
    let summary = pipeline.run(&[0, 1, 2], &mut writer, |progress| reported.push(progress.to_string())).await?;

    assert_eq!(read_lines(&output)?, vec!["[zh-cn] Bonjour", "[zh-cn] Le monde", "[zh-cn] Fin"]);
    assert_eq!(reported, vec!["1/3 (33.3%)", "2/3 (66.7%)", "3/3 (100.0%)"]);
    assert_eq!(summary.selected, 3);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.skipped, 0);
    assert!(ocr.calls().is_empty());
    assert_eq!(translator.calls()[0], TranslateCall {
        text: "Bonjour".to_string(),
        source_language: "fr".to_string(),
        target_language: "zh-cn".to_string(),
    });
    Ok(())
}

#[tokio::test]
async fn test_run_withWhitespaceOnlyPage_shouldRunOcrExactlyOnce() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");
    let source = FakePages::new(&["Text page", " \n\t "]);
    let ocr = CountingOcr::new().with_page(1, "こんにちは\n");
    let translator = MockTranslator::new();

    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "auto", "EN-US");
    let mut writer = OutputWriter::create(&output)?;
    let summary = pipeline.run(&[0, 1], &mut writer, |_| {}).await?;

    assert_eq!(ocr.calls(), vec![1]);
    assert_eq!(summary.ocr_pages, 1);
    assert_eq!(translator.calls()[1].text, "こんにちは\n");
    assert_eq!(read_lines(&output)?, vec!["[EN-US] Text page", "[EN-US] こんにちは"]);
    Ok(())
}

#[test]
fn test_resolvePage_shouldTagOrigin() {
    let source = FakePages::new(&["embedded", ""]);
    let ocr = CountingOcr::new().with_page(1, "scanned");
    let translator = MockTranslator::new();
    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "auto", "zh-cn");

    let first = pipeline.resolve_page(0).unwrap();
    let second = pipeline.resolve_page(1).unwrap();

    assert_eq!(first.origin, TextOrigin::Extracted);
    assert_eq!(second.origin, TextOrigin::Ocr);
    assert_eq!(second.text, "scanned");
}

#[test]
fn test_run_withPageEmptyAfterOcr_shouldSkipWithoutLineOrProgress() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");
    let source = FakePages::new(&["One", "", "Three"]);
    let ocr = CountingOcr::new().with_page(1, "  \n");
    let translator = MockTranslator::new();

    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "auto", "zh-cn");
    let mut writer = OutputWriter::create(&output)?;
    let mut reported = Vec::new();
    let summary = tokio_test::block_on(
        pipeline.run(&[0, 1, 2], &mut writer, |progress| reported.push(progress.to_string()))
    )?;

    assert_eq!(read_lines(&output)?, vec!["[zh-cn] One", "[zh-cn] Three"]);
    assert_eq!(reported, vec!["1/3 (33.3%)", "3/3 (100.0%)"]);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(translator.calls().len(), 2);
    Ok(())
}

#[test]
fn test_run_withOcrToolsMissing_shouldAbortKeepingEarlierLines() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");
    let source = FakePages::new(&["First", "", "Third"]);
    let availability = OcrAvailability { missing: vec!["pdftoppm".to_string(), "tesseract".to_string()] };
    let ocr = TesseractOcr::with_availability(Config::default().ocr, availability);
    let translator = MockTranslator::new();

    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "auto", "zh-cn");
    let mut writer = OutputWriter::create(&output)?;
    let result = tokio_test::block_on(pipeline.run(&[0, 1, 2], &mut writer, |_| {}));

    assert!(matches!(result, Err(AppError::OcrUnavailable(ref missing)) if missing.len() == 2));
    assert_eq!(read_lines(&output)?, vec!["[zh-cn] First"]);
    assert_eq!(translator.calls().len(), 1);
    Ok(())
}

#[test]
fn test_run_withTranslatorFailure_shouldStopAtFailingPage() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");
    let source = FakePages::new(&["a", "b", "c"]);
    let ocr = CountingOcr::new();
    let translator = MockTranslator::failing_on(2);

    let pipeline = PagePipeline::new(&source, Path::new("in.pdf"), &ocr, &translator, "auto", "zh-cn");
    let mut writer = OutputWriter::create(&output)?;
    let result = tokio_test::block_on(pipeline.run(&[0, 1, 2], &mut writer, |_| {}));

    assert!(matches!(result, Err(AppError::Provider(ProviderError::AuthenticationError(_)))));
    assert_eq!(read_lines(&output)?, vec!["[zh-cn] a"]);
    assert_eq!(translator.calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_controller_withReversedRange_shouldWriteEmptyOutput() -> Result<()> {
    let dir = create_temp_dir()?;
    let input = create_test_pdf(dir.path(), "in.pdf", &["Page one", "Page two"])?;
    let output = dir.path().join("out.txt");

    let mut config = Config::default();
    config.translation.api_key = "unused".to_string();
    config.pages = Some("5-2".to_string());

    let summary = Controller::with_config(config)?.run(&input, &output).await?;

    assert_eq!(summary.selected, 0);
    assert_eq!(summary.written, 0);
    assert!(output.exists());
    assert!(read_lines(&output)?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_controller_withMissingInput_shouldNotCreateOutput() -> Result<()> {
    let dir = create_temp_dir()?;
    let output = dir.path().join("out.txt");

    let mut config = Config::default();
    config.translation.api_key = "unused".to_string();

    let result = Controller::with_config(config)?.run(&dir.path().join("nope.pdf"), &output).await;

    assert!(matches!(result, Err(AppError::File(_))));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_controller_withoutApiKey_shouldBeRejected() {
    assert!(matches!(Controller::with_config(Config::default()), Err(AppError::MissingApiKey(_))));
}

#[test]
fn test_formatDuration_shouldPickLargestUnit() {
    use std::time::Duration;

    assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}

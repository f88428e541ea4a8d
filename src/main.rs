// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::PathBuf;

use pdftranx::app_config::{self, Config, DeepSeekModel, Engine};
use pdftranx::app_controller::Controller;

/// CLI wrapper for Engine to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEngine {
    Deepl,
    Deepseek,
}

impl From<CliEngine> for Engine {
    fn from(cli_engine: CliEngine) -> Self {
        match cli_engine {
            CliEngine::Deepl => Engine::DeepL,
            CliEngine::Deepseek => Engine::DeepSeek,
        }
    }
}

/// CLI wrapper for DeepSeekModel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliModel {
    DeepseekChat,
    DeepseekReasoner,
}

impl From<CliModel> for DeepSeekModel {
    fn from(cli_model: CliModel) -> Self {
        match cli_model {
            CliModel::DeepseekChat => DeepSeekModel::Chat,
            CliModel::DeepseekReasoner => DeepSeekModel::Reasoner,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for pdftranx
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// pdftranx - translate PDF documents page by page
///
/// Extracts the text of each page (running OCR on pages without embedded
/// text), translates it with DeepL or DeepSeek and writes one line per page.
#[derive(Parser, Debug)]
#[command(name = "pdftranx")]
#[command(version)]
#[command(about = "Translate PDF documents page by page with DeepL or DeepSeek")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "pdftranx extracts the text of a PDF page by page, falls back to OCR for scanned pages, \
translates each page and writes one line per page to a text file.

EXAMPLES:
    pdftranx book.pdf book.txt --api-key KEY                       # DeepL, auto -> zh-cn
    pdftranx book.pdf book.txt --dest EN-US --pages 1-5 --api-key KEY
    pdftranx book.pdf book.txt --engine deepseek --model deepseek-reasoner --api-key KEY
    pdftranx scan.pdf scan.txt --ocr-lang eng --api-key KEY        # OCR English scans
    pdftranx completions bash > pdftranx.bash

OCR:
    Pages without embedded text are rendered with pdftoppm (poppler-utils)
    and recognized with tesseract. The OCR language defaults to jpn and is
    independent of --src.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input PDF file
    #[arg(value_name = "INPUT_PDF")]
    input_pdf: Option<PathBuf>,

    /// Output text file (overwritten)
    #[arg(value_name = "OUTPUT_TXT")]
    output_txt: Option<PathBuf>,

    /// Source language [default: auto]
    #[arg(long)]
    src: Option<String>,

    /// Destination language [default: zh-cn]
    #[arg(long)]
    dest: Option<String>,

    /// Translation engine [default: deepl]
    #[arg(long, value_enum)]
    engine: Option<CliEngine>,

    /// Page range to translate, 1-based and inclusive, e.g. 1-5
    #[arg(long)]
    pages: Option<String>,

    /// API key for the selected engine
    #[arg(long, env = "PDFTRANX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// DeepSeek model [default: deepseek-chat]
    #[arg(long, value_enum)]
    model: Option<CliModel>,

    /// Tesseract language for the OCR fallback [default: jpn]
    #[arg(long)]
    ocr_lang: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Stderr logger with timestamps and colored levels
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Level is adjusted once the config is known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "pdftranx", &mut std::io::stdout());
        return Ok(());
    }

    let input_pdf = cli.input_pdf.clone()
        .ok_or_else(|| anyhow!("INPUT_PDF is required when no subcommand is specified"))?;
    let output_txt = cli.output_txt.clone()
        .ok_or_else(|| anyhow!("OUTPUT_TXT is required when no subcommand is specified"))?;

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;
    controller.run(&input_pdf, &output_txt).await
        .context(format!("Failed to translate {}", input_pdf.display()))?;

    Ok(())
}

/// Load the optional config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) if path.exists() => Config::from_file(path)
            .context(format!("Failed to load config file: {}", path.display()))?,
        Some(path) => {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)
                .context(format!("Failed to write default config to file: {}", path.display()))?;
            config
        }
        None => Config::default(),
    };

    if let Some(src) = &cli.src {
        config.source_language = src.clone();
    }
    if let Some(dest) = &cli.dest {
        config.target_language = dest.clone();
    }
    if let Some(pages) = &cli.pages {
        config.pages = Some(pages.clone());
    }
    if let Some(engine) = &cli.engine {
        config.translation.engine = engine.clone().into();
    }
    if let Some(api_key) = &cli.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(model) = &cli.model {
        config.translation.model = model.clone().into();
    }
    if let Some(ocr_lang) = &cli.ocr_lang {
        config.ocr.language = ocr_lang.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

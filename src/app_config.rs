//! Application configuration: loading, validating and saving settings.

use serde::{Serialize, Deserialize};
use std::default::Default;
use std::path::Path;
use url::Url;

use crate::errors::AppError;
use crate::page_range;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language hint, passed through to the engine
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Destination language, passed through to the engine
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Optional 1-based `start-end` page range
    #[serde(default)]
    pub pages: Option<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// OCR fallback config
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation engine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Engine {
    // @engine: DeepL translation API
    #[default]
    DeepL,
    // @engine: DeepSeek chat completions API
    DeepSeek,
}

impl Engine {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DeepL => "DeepL",
            Self::DeepSeek => "DeepSeek",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepL => "deepl",
            Self::DeepSeek => "deepseek",
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Engine {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(AppError::UnknownEngine(s.to_string())),
        }
    }
}

impl TryFrom<String> for Engine {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, AppError> {
        value.parse()
    }
}

impl From<Engine> for String {
    fn from(engine: Engine) -> Self {
        engine.as_str().to_string()
    }
}

/// Chat model used by the DeepSeek engine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeepSeekModel {
    #[default]
    #[serde(rename = "deepseek-chat")]
    Chat,
    #[serde(rename = "deepseek-reasoner")]
    Reasoner,
}

impl DeepSeekModel {
    // @returns: Model identifier sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "deepseek-chat",
            Self::Reasoner => "deepseek-reasoner",
        }
    }
}

impl std::fmt::Display for DeepSeekModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Engine to use
    #[serde(default)]
    pub engine: Engine,

    /// API key for the selected engine
    #[serde(default = "String::new")]
    pub api_key: String,

    /// DeepSeek model, ignored by DeepL
    #[serde(default)]
    pub model: DeepSeekModel,

    /// DeepL base URL; derived from the key type when empty
    #[serde(default = "String::new")]
    pub deepl_endpoint: String,

    /// DeepSeek base URL (OpenAI compatible)
    #[serde(default = "default_deepseek_endpoint")]
    pub deepseek_endpoint: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            api_key: String::new(),
            model: DeepSeekModel::default(),
            deepl_endpoint: String::new(),
            deepseek_endpoint: default_deepseek_endpoint(),
            timeout_secs: None,
        }
    }
}

impl TranslationConfig {
    /// Base URL of the DeepL API for the configured key
    ///
    /// Free-tier keys end in `:fx` and are served from a separate host.
    pub fn get_deepl_endpoint(&self) -> String {
        if !self.deepl_endpoint.is_empty() {
            return self.deepl_endpoint.clone();
        }

        if self.api_key.ends_with(":fx") {
            default_deepl_free_endpoint()
        } else {
            default_deepl_pro_endpoint()
        }
    }

    /// Base URL of the active engine
    pub fn get_endpoint(&self) -> String {
        match self.engine {
            Engine::DeepL => self.get_deepl_endpoint(),
            Engine::DeepSeek => self.deepseek_endpoint.clone(),
        }
    }

    /// Model label for log lines
    pub fn get_model(&self) -> &'static str {
        match self.engine {
            Engine::DeepL => "default",
            Engine::DeepSeek => self.model.as_str(),
        }
    }
}

/// OCR fallback configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OcrConfig {
    /// Tesseract language code, independent of the translation languages
    #[serde(default = "default_ocr_language")]
    pub language: String,

    /// Render resolution in dots per inch
    #[serde(default = "default_ocr_dpi")]
    pub dpi: u32,

    /// Page rasterizer command
    #[serde(default = "default_pdftoppm_cmd")]
    pub pdftoppm_cmd: String,

    /// Text recognizer command
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_ocr_language(),
            dpi: default_ocr_dpi(),
            pdftoppm_cmd: default_pdftoppm_cmd(),
            tesseract_cmd: default_tesseract_cmd(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "zh-cn".to_string()
}

fn default_deepl_free_endpoint() -> String {
    "https://api-free.deepl.com".to_string()
}

fn default_deepl_pro_endpoint() -> String {
    "https://api.deepl.com".to_string()
}

fn default_deepseek_endpoint() -> String {
    "https://api.deepseek.com/v1".to_string()
}

fn default_ocr_language() -> String {
    "jpn".to_string()
}

fn default_ocr_dpi() -> u32 {
    200
}

fn default_pdftoppm_cmd() -> String {
    "pdftoppm".to_string()
}

fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::File(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let parse_error = |e: serde_json::Error| {
            AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        };
        let value: serde_json::Value = serde_json::from_str(&content).map_err(parse_error)?;

        // Surface a bad engine name as such rather than as a generic parse failure
        if let Some(engine) = value.pointer("/translation/engine").and_then(|v| v.as_str()) {
            engine.parse::<Engine>()?;
        }

        serde_json::from_value(value).map_err(parse_error)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate the configuration before any page is processed
    pub fn validate(&self) -> Result<(), AppError> {
        if self.translation.api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey(self.translation.engine.display_name().to_string()));
        }

        page_range::parse_optional(self.pages.as_deref())?;

        let endpoint = self.translation.get_endpoint();
        Url::parse(&endpoint)
            .map_err(|e| AppError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        if self.ocr.dpi == 0 {
            return Err(AppError::Config("OCR resolution must be greater than zero".to_string()));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            pages: None,
            translation: TranslationConfig::default(),
            ocr: OcrConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

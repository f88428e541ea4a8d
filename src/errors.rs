/*!
 * Error types for the pdftranx application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with translation provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The `--pages` expression could not be parsed
    #[error("Invalid page range '{0}', expected the form start-end (e.g. 1-5)")]
    InvalidRange(String),

    /// A credentialed engine was selected without an API key
    #[error("An API key is required for the {0} engine (use --api-key)")]
    MissingApiKey(String),

    /// A page needed OCR but the OCR tools are not installed
    #[error("OCR dependencies are missing: {}. Install poppler-utils and tesseract", .0.join(", "))]
    OcrUnavailable(Vec<String>),

    /// An engine identifier outside the supported set
    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    /// The PDF could not be opened or parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Rendering or recognizing a page failed
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<lopdf::Error> for AppError {
    fn from(error: lopdf::Error) -> Self {
        Self::Pdf(error.to_string())
    }
}

/*!
 * Core translation service implementation.
 *
 * `TranslationService` is a closed set of engines, one variant per backend,
 * each owning its client and the request shape that backend expects.
 */

use async_trait::async_trait;
use log::debug;

use crate::app_config::{DeepSeekModel, Engine, TranslationConfig};
use crate::errors::{AppError, ProviderError};
use crate::providers::Provider;
use crate::providers::deepl::{DeepL, DeepLRequest};
use crate::providers::deepseek::{ChatRequest, DeepSeek};
use super::prompts::PromptTemplate;

/// Translates one page of text
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_language` into `target_language`
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, AppError>;
}

/// Translation service dispatching to the configured engine
#[derive(Debug)]
pub enum TranslationService {
    /// DeepL translation API
    DeepL {
        client: DeepL,
    },
    /// DeepSeek chat completions
    DeepSeek {
        client: DeepSeek,
        model: DeepSeekModel,
        prompt: PromptTemplate,
    },
}

impl TranslationService {
    /// Create the service for the configured engine.
    ///
    /// Fails without an API key, before any request is made.
    pub fn new(config: &TranslationConfig) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey(config.engine.display_name().to_string()));
        }

        let service = match config.engine {
            Engine::DeepL => Self::DeepL {
                client: DeepL::new(&config.api_key, config.get_deepl_endpoint(), config.timeout_secs),
            },
            Engine::DeepSeek => Self::DeepSeek {
                client: DeepSeek::new(&config.api_key, &config.deepseek_endpoint, config.timeout_secs),
                model: config.model,
                prompt: PromptTemplate::default(),
            },
        };

        Ok(service)
    }

    /// The engine behind this service
    pub fn engine(&self) -> Engine {
        match self {
            Self::DeepL { .. } => Engine::DeepL,
            Self::DeepSeek { .. } => Engine::DeepSeek,
        }
    }

    async fn translate_deepl(client: &DeepL, text: &str, target_language: &str) -> Result<String, AppError> {
        let response = client.complete(DeepLRequest::new(text, target_language)).await?;

        if let Some(detected) = response.translations.first().and_then(|t| t.detected_source_language.as_deref()) {
            debug!("DeepL detected source language {}", detected);
        }

        DeepL::extract_text(&response)
            .ok_or_else(|| ProviderError::ParseError("DeepL returned no translations".to_string()).into())
    }

    async fn translate_deepseek(
        client: &DeepSeek,
        model: DeepSeekModel,
        prompt: &PromptTemplate,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, AppError> {
        let request = ChatRequest::new(model.as_str())
            .add_message("system", PromptTemplate::SYSTEM)
            .add_message("user", prompt.render(source_language, target_language, text));

        let response = client.complete(request).await?;

        DeepSeek::extract_text(&response)
            .ok_or_else(|| ProviderError::ParseError("DeepSeek returned no message content".to_string()).into())
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, AppError> {
        match self {
            Self::DeepL { client } => {
                Self::translate_deepl(client, text, target_language).await
            }
            Self::DeepSeek { client, model, prompt } => {
                Self::translate_deepseek(client, *model, prompt, text, source_language, target_language).await
            }
        }
    }
}

/*!
 * Provider implementations for the supported translation services.
 *
 * This module contains client implementations for:
 * - DeepL: DeepL translation API
 * - DeepSeek: DeepSeek chat completions API (OpenAI compatible)
 */

use async_trait::async_trait;
use log::error;
use reqwest::{Client, Response};
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// Each provider has its own request and response shape; the translation
/// service builds the request and pulls the translated text back out.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract the translated text from the provider response, if any
    fn extract_text(response: &Self::Response) -> Option<String>;
}

/// Build the HTTP client shared by all requests of one provider.
///
/// Without a configured timeout, requests wait for the server indefinitely.
pub(crate) fn build_client(timeout_secs: Option<u64>) -> Client {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().unwrap_or_default()
}

/// Turn a non-success HTTP status into a typed provider error
pub(crate) async fn check_status(response: Response, provider: &str) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error!("{} API error ({}): {}", provider, status, message);

    Err(match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        status_code => ProviderError::ApiError { status_code, message },
    })
}

pub mod deepl;
pub mod deepseek;

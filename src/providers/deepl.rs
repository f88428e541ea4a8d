use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use super::{Provider, build_client, check_status};

/// DeepL client for interacting with the DeepL translation API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL, e.g. `https://api-free.deepl.com`
    endpoint: String,
}

/// DeepL translate request
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate
    text: Vec<String>,

    /// Target language code, upper-cased; the source language is left to detection
    target_lang: String,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One translation per submitted text
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language DeepL detected for the source text
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

impl DeepLRequest {
    /// Create a request translating `text` into `target_lang`
    pub fn new(text: impl Into<String>, target_lang: &str) -> Self {
        Self {
            text: vec![text.into()],
            target_lang: target_lang.to_uppercase(),
        }
    }
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            client: build_client(timeout_secs),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/v2/translate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for DeepL {
    type Request = DeepLRequest;
    type Response = DeepLResponse;

    async fn complete(&self, request: DeepLRequest) -> Result<DeepLResponse, ProviderError> {
        let response = self.client.post(self.api_url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let response = check_status(response, "DeepL").await?;

        response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL response: {}", e)))
    }

    fn extract_text(response: &DeepLResponse) -> Option<String> {
        response.translations.first().map(|t| t.text.clone())
    }
}

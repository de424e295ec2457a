//! OCR.space HTTP provider.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::debug;

use rcpt_core::OcrProvider;
use rcpt_core::error::ProviderError;
use rcpt_core::models::config::OcrConfig;

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "RCPT_OCR_API_KEY";

/// Provider backed by the OCR.space parse endpoint.
pub struct OcrSpaceProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl OcrSpaceProvider {
    /// Build a provider from config. An explicit key wins over the
    /// environment, which wins over the config file.
    pub fn from_config(config: &OcrConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let api_key = resolve_api_key(
            api_key,
            std::env::var(API_KEY_ENV).ok(),
            config.api_key.clone(),
        )?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            language: config.language.clone(),
        })
    }
}

/// Pick the first non-blank key out of flag, environment and config.
fn resolve_api_key(
    explicit: Option<String>,
    env: Option<String>,
    config: Option<String>,
) -> Result<String, ProviderError> {
    [explicit, env, config]
        .into_iter()
        .flatten()
        .find(|k| !k.trim().is_empty())
        .ok_or(ProviderError::MissingApiKey)
}

impl OcrProvider for OcrSpaceProvider {
    fn name(&self) -> &str {
        "ocr.space"
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, ProviderError> {
        let payload = data_uri(image);
        let form = [
            ("apikey", self.api_key.as_str()),
            ("base64Image", payload.as_str()),
            ("language", self.language.as_str()),
            ("isCreateSearchablePdf", "false"),
            ("isSearchablePdfHideTextLayer", "true"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let parsed: ParseResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::Request(format!("invalid response: {}", e)))?;

        debug!(
            "OCR.space returned {} parsed results",
            parsed.parsed_results.len()
        );

        parsed.into_text()
    }
}

/// Encode the image as a data URI, sniffing the mime type from its bytes.
fn data_uri(image: &[u8]) -> String {
    let mime = image::guess_format(image)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/jpeg");
    format!("data:{};base64,{}", mime, STANDARD.encode(image))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParseResponse {
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(default)]
    error_message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

/// OCR.space sends the error message either as a string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn join(self) -> String {
        match self {
            Self::One(s) => s,
            Self::Many(v) => v.join("; "),
        }
    }
}

impl ParseResponse {
    fn into_text(self) -> Result<String, ProviderError> {
        if !self.is_errored_on_processing {
            if let Some(first) = self.parsed_results.into_iter().next() {
                return Ok(first.parsed_text);
            }
        }

        let message = self
            .error_message
            .map(ErrorMessage::join)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(ProviderError::Processing(message))
    }
}

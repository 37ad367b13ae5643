use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the text-extraction service
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the external document-extraction endpoint
///
/// Forwards an uploaded file as multipart form data and expects a
/// `{ "text": ... }` reply. The endpoint itself does the PDF/text parsing.
pub struct ExtractorClient {
    endpoint: String,
    client: Client,
}

impl ExtractorClient {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, client }
    }

    /// Extract plain text from an uploaded document
    pub async fn extract_text(
        &self,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, ExtractorError> {
        let part = Part::bytes(data).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        tracing::debug!("Forwarding {} to extraction service", file_name);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractorError::ApiError(format!(
                "Extraction request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("text")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ExtractorError::InvalidResponse("Missing text field in extraction reply".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_client_creation() {
        let client = ExtractorClient::new("https://files.example.com/extract-file".to_string());
        assert_eq!(client.endpoint, "https://files.example.com/extract-file");
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{FactClient, FactError};
use crate::config::FactsConfig;

#[derive(Debug, Deserialize)]
struct FactBody {
    text: String,
}

/// Fact client for a numbersapi-style HTTP service.
///
/// Requests `GET {base_url}/{number}?json` and reads the `text` field.
pub struct HttpFactClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpFactClient {
    pub fn new(config: &FactsConfig) -> Result<Self, FactError> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FactError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, err: reqwest::Error) -> FactError {
        if err.is_timeout() {
            FactError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            FactError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl FactClient for HttpFactClient {
    async fn fetch(&self, number: u64) -> Result<String, FactError> {
        let url = format!("{}/{}?json", self.base_url, number);
        tracing::debug!(url = %url, "Fetching number fact");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), number, "Fact service returned error status");
            return Err(FactError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let fact: FactBody =
            serde_json::from_str(&body).map_err(|e| FactError::Decode(e.to_string()))?;
        Ok(fact.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = FactsConfig {
            base_url: "http://localhost:9/".to_string(),
            timeout_seconds: 1,
        };
        let client = HttpFactClient::new(&config).expect("client");
        assert_eq!(client.base_url(), "http://localhost:9");
    }

    #[test]
    fn fact_body_reads_text_field() {
        let body: FactBody =
            serde_json::from_str(r#"{"text":"42 is the answer.","number":42,"found":true}"#)
                .expect("decode");
        assert_eq!(body.text, "42 is the answer.");
    }
}

use std::time::Duration;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use crate::errors::{GateError, GateResult};
use crate::structs::http_reply::HttpReply;
use crate::traits::sonar_transport::SonarTransport;

#[derive(Clone)]
pub struct SonarClient {
    client: Client,
}

impl SonarClient {
    pub fn new(token: Option<&str>, request_timeout: Duration) -> GateResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&Self::basic_auth_value(token))
                .map_err(|e| GateError::config_error(&format!("Invalid token: {}", e), Some("server.token"), None))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .connect_timeout(request_timeout)
            .user_agent(concat!("sonar-gate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GateError::network_error("building HTTP client", None, &e.to_string()))?;

        Ok(Self { client })
    }

    /// Sonar tokens travel as the user name of a Basic credential with an empty password.
    pub fn basic_auth_value(token: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", token)))
    }
}

#[async_trait]
impl SonarTransport for SonarClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> GateResult<HttpReply> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| GateError::Network {
                operation: "GET".to_string(),
                url: Some(url.to_string()),
                status_code: e.status().map(|s| s.as_u16()),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("GET {} -> {}", url, status);

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_token_with_empty_password() {
        // base64("squ_abc:")
        assert_eq!(SonarClient::basic_auth_value("squ_abc"), "Basic c3F1X2FiYzo=");
    }

    #[test]
    fn builds_without_token() {
        assert!(SonarClient::new(None, Duration::from_secs(5)).is_ok());
        assert!(SonarClient::new(Some(""), Duration::from_secs(5)).is_ok());
    }
}

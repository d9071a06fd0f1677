//! HTTP client for making requests to the search appliance

use crate::config::{ApplianceOptions, OutgoingSettings};
use crate::error::{GsaError, Result};
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper configured for appliance requests
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default(), None)
    }

    /// Create a client for the given appliance options
    pub fn for_appliance(options: &ApplianceOptions, settings: &OutgoingSettings) -> Result<Self> {
        Self::with_settings(settings, options.proxy())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings, proxy: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().gzip(true).brotli(true);

        if let Some(timeout) = settings.request_timeout {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(GsaError::Config(format!(
                    "request timeout must be positive, got {}",
                    timeout
                )));
            }
            let timeout = Duration::try_from_secs_f64(timeout).map_err(|e| {
                GsaError::Config(format!("request timeout {} out of range: {}", timeout, e))
            })?;
            builder = builder.timeout(timeout);
        }

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| GsaError::Config(format!("invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        })
    }

    /// GET a URL and return the body of a successful response
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "application/xml, text/xml;q=0.9, */*;q=0.8")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), crate::VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert!(client.unwrap().user_agent().starts_with("gsa-client/"));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let settings = OutgoingSettings {
            request_timeout: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_settings(&settings, None),
            Err(GsaError::Config(_))
        ));

        let huge = OutgoingSettings {
            request_timeout: Some(1e30),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_settings(&huge, None),
            Err(GsaError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_get_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(header("user-agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<GSP/>"))
            .expect(1)
            .mount(&server)
            .await;

        let settings = OutgoingSettings {
            user_agent: Some("test-agent".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings, None).unwrap();
        let body = client
            .get_text(&format!("{}/search", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<GSP/>");
    }

    #[tokio::test]
    async fn test_error_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_text(&server.uri()).await.unwrap_err();
        assert!(matches!(err, GsaError::Http(_)));
    }
}

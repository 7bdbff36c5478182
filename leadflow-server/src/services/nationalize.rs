//! nationalize.io API client

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const NATIONALIZE_BASE_URL: &str = "https://api.nationalize.io";
const USER_AGENT: &str = concat!("leadflow/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Nationalize client errors
#[derive(Debug, Error)]
pub enum NationalizeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One country candidate from the prediction response
#[derive(Debug, Clone, Deserialize)]
pub struct CountryCandidate {
    pub country_id: String,
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
struct NationalizeResponse {
    // The API omits or nulls the field when it has no prediction
    country: Option<Vec<CountryCandidate>>,
}

/// Client for the nationality-prediction API
pub struct NationalizeClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl NationalizeClient {
    pub fn new() -> Result<Self, NationalizeError> {
        Self::with_base_url(NATIONALIZE_BASE_URL)
    }

    /// Point the client at a different endpoint (mock servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, NationalizeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NationalizeError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Country candidates for a name.
    ///
    /// An absent or empty `country` array is a successful lookup with no
    /// candidates, not an error.
    pub async fn lookup(&self, name: &str) -> Result<Vec<CountryCandidate>, NationalizeError> {
        tracing::debug!(name, "querying nationality prediction API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|e| NationalizeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NationalizeError::Api(status.as_u16(), body));
        }

        let parsed: NationalizeResponse = response
            .json()
            .await
            .map_err(|e| NationalizeError::Parse(e.to_string()))?;

        Ok(parsed.country.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn lookup_parses_candidates() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("name", "john");
            then.status(200).json_body(json!({
                "count": 123,
                "name": "john",
                "country": [
                    {"country_id": "US", "probability": 0.42},
                    {"country_id": "GB", "probability": 0.11},
                ],
            }));
        });

        let client = NationalizeClient::with_base_url(server.base_url()).unwrap();
        let candidates = client.lookup("john").await.unwrap();

        mock.assert();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].country_id, "US");
        assert_eq!(candidates[0].probability, 0.42);
    }

    #[tokio::test]
    async fn missing_country_field_is_empty_not_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(json!({"count": 0, "name": "zzzz"}));
        });

        let client = NationalizeClient::with_base_url(server.base_url()).unwrap();
        let candidates = client.lookup("zzzz").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(429).body("rate limited");
        });

        let client = NationalizeClient::with_base_url(server.base_url()).unwrap();
        let err = client.lookup("john").await.unwrap_err();
        match err {
            NationalizeError::Api(status, body) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("not json");
        });

        let client = NationalizeClient::with_base_url(server.base_url()).unwrap();
        let err = client.lookup("john").await.unwrap_err();
        assert!(matches!(err, NationalizeError::Parse(_)));
    }
}

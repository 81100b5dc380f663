// src/storage.rs

use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use crate::{error::AppError, models::quiz::QuizMetadata};

/// Seam over content-addressed storage: gateway reads of published quiz
/// metadata plus JSON pinning through the pinning service.
///
/// The store never mutates published documents; a metadata URI always
/// resolves to the same bytes.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetches and parses the quiz metadata document behind a metadata URI.
    async fn fetch(&self, uri: &str) -> Result<QuizMetadata, AppError>;

    /// Pins a JSON document and returns its content hash (CID).
    async fn publish(&self, content: &Value, name: &str) -> Result<String, AppError>;
}

/// `MetadataStore` backed by an IPFS HTTP gateway and a Pinata-compatible
/// pinning API.
pub struct IpfsStore {
    http: reqwest::Client,
    gateway: String,
    pinata_api_url: String,
    pinata_jwt: Option<String>,
}

impl IpfsStore {
    pub fn new(
        http: reqwest::Client,
        gateway: String,
        pinata_api_url: String,
        pinata_jwt: Option<String>,
    ) -> Self {
        Self {
            http,
            gateway,
            pinata_api_url,
            pinata_jwt,
        }
    }

    /// Resolves a metadata URI to a fetchable URL. `ipfs://CID` goes through
    /// the configured gateway; anything else is assumed already fetchable.
    fn resolve(&self, uri: &str) -> Result<String, AppError> {
        match uri.strip_prefix("ipfs://") {
            Some(cid) => {
                let base = Url::parse(&self.gateway).map_err(|e| {
                    AppError::Configuration(format!("Invalid IPFS gateway URL: {}", e))
                })?;
                let resolved = base.join(cid).map_err(|e| {
                    AppError::MetadataFetch(format!("Invalid metadata URI {}: {}", uri, e))
                })?;
                Ok(resolved.to_string())
            }
            None => Ok(uri.to_string()),
        }
    }
}

#[async_trait]
impl MetadataStore for IpfsStore {
    async fn fetch(&self, uri: &str) -> Result<QuizMetadata, AppError> {
        let url = self.resolve(uri)?;

        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::MetadataFetch(format!("Failed to fetch quiz metadata: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::MetadataFetch(format!(
                "Failed to fetch quiz metadata: HTTP {}",
                response.status()
            )));
        }

        response.json::<QuizMetadata>().await.map_err(|e| {
            AppError::MetadataFetch(format!("Quiz metadata is not valid JSON: {}", e))
        })
    }

    async fn publish(&self, content: &Value, name: &str) -> Result<String, AppError> {
        let jwt = self.pinata_jwt.as_deref().ok_or_else(|| {
            AppError::Configuration("Pinning service credentials not set".to_string())
        })?;

        let url = format!(
            "{}/pinning/pinJSONToIPFS",
            self.pinata_api_url.trim_end_matches('/')
        );

        let body = json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(jwt)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach pinning service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Pinning service rejected upload: HTTP {}",
                response.status()
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid pinning service response: {}", e)))?;

        parsed
            .get("IpfsHash")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Internal("Pinning service response missing IpfsHash".to_string())
            })
    }
}

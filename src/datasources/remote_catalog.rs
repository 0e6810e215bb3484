use super::{CatalogDocument, CatalogSource};
use crate::config::CatalogConfig;
use crate::error::{NutriRootError, Result};
use crate::models::CropProfile;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Crop catalog served over HTTP as a JSON list or id-to-crop map.
pub struct RemoteCatalog {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl RemoteCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self) -> Result<&str> {
        self.config
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| NutriRootError::Config("catalog.url is not set".into()))
    }

    async fn fetch_once(&self) -> Result<Vec<CropProfile>> {
        let url = self.url()?;
        let mut request = self.client.get(url);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NutriRootError::CatalogUnavailable(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NutriRootError::CatalogUnavailable(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        let document: CatalogDocument = response.json().await.map_err(|e| {
            NutriRootError::CatalogUnavailable(format!("Failed to parse crop catalog: {}", e))
        })?;

        Ok(document.into_crops())
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn fetch_crops(&self) -> Result<Vec<CropProfile>> {
        with_retries(self.config.max_attempts, RETRY_BACKOFF, || self.fetch_once()).await
    }

    async fn test_connection(&self) -> Result<bool> {
        let url = self.url()?;
        let mut request = self.client.head(url);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| NutriRootError::CatalogUnavailable(format!("{}: {}", url, e)))?;
        Ok(response.status().is_success())
    }

    fn describe(&self) -> String {
        format!("url {}", self.config.url.as_deref().unwrap_or_default())
    }
}

/// Run `op` up to `max_attempts` times, sleeping `backoff * attempt` between tries.
pub async fn with_retries<T, F, Fut>(max_attempts: u32, backoff: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                tracing::error!(attempts = attempt, "Giving up on crop catalog: {}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(attempt, "Crop catalog fetch failed: {}", e);
                tokio::time::sleep(backoff * attempt).await;
                attempt += 1;
            }
        }
    }
}

use crate::domain::model::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{FetchError, LibraryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/MACBRUH-OFC/FreeFire-Resources/main/data/itemData.json";
pub const DEFAULT_USER_AGENT: &str = "FreeFire-Item-Library/1.0";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 每次呼叫對固定網址發一次 GET，不重試
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| LibraryError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> std::result::Result<Arc<Catalog>, FetchError> {
        tracing::info!("Fetching item catalog from: {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("❌ Catalog request failed: {}", e);
            FetchError::Network(e)
        })?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            tracing::error!("❌ Catalog source returned HTTP {}", status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("❌ Failed to read catalog body: {}", e);
            FetchError::Network(e)
        })?;

        let json_data: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("❌ Catalog body is not valid JSON: {}", e);
            FetchError::Parse(e)
        })?;

        let serde_json::Value::Array(entries) = json_data else {
            tracing::error!("❌ Catalog body is JSON but not an array");
            return Err(FetchError::NotArray);
        };

        let catalog = Catalog::from_values(entries);
        if catalog.skipped > 0 {
            tracing::warn!("Skipped {} malformed catalog entries", catalog.skipped);
        }
        tracing::info!("✅ Fetched {} items", catalog.len());

        Ok(Arc::new(catalog))
    }
}

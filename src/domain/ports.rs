use crate::domain::model::Catalog;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

/// 能產生一份最新道具資料集的來源
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Arc<Catalog>, FetchError>;
}

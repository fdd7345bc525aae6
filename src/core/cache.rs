// 可選的記憶體 TTL 快取，TTL 為 0 時每次都直接呼叫內層來源

use crate::domain::model::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    catalog: Arc<Catalog>,
}

pub struct CachedCatalogSource<S: CatalogSource> {
    inner: S,
    ttl: Duration,
    serve_stale_on_error: bool,
    entry: RwLock<Option<CacheEntry>>,
}

impl<S: CatalogSource> CachedCatalogSource<S> {
    pub fn new(inner: S, ttl: Duration, serve_stale_on_error: bool) -> Self {
        Self {
            inner,
            ttl,
            serve_stale_on_error,
            entry: RwLock::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
        tracing::debug!("Catalog cache invalidated");
    }

    fn fresh(&self, entry: &Option<CacheEntry>) -> Option<Arc<Catalog>> {
        entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| e.catalog.clone())
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for CachedCatalogSource<S> {
    async fn fetch(&self) -> Result<Arc<Catalog>, FetchError> {
        if !self.is_enabled() {
            return self.inner.fetch().await;
        }

        if let Some(catalog) = self.fresh(&*self.entry.read().await) {
            tracing::debug!("Serving catalog from cache ({} items)", catalog.len());
            return Ok(catalog);
        }

        // 持有寫鎖期間只會有一個請求實際去抓資料，其他請求等待後直接取用結果
        let mut entry = self.entry.write().await;
        if let Some(catalog) = self.fresh(&entry) {
            return Ok(catalog);
        }

        match self.inner.fetch().await {
            Ok(catalog) => {
                *entry = Some(CacheEntry {
                    fetched_at: Instant::now(),
                    catalog: catalog.clone(),
                });
                Ok(catalog)
            }
            Err(e) => match &*entry {
                Some(stale) if self.serve_stale_on_error => {
                    tracing::warn!(
                        "Catalog refresh failed ({}), serving stale copy from {:?} ago",
                        e.reason(),
                        stale.fetched_at.elapsed()
                    );
                    Ok(stale.catalog.clone())
                }
                _ => Err(e),
            },
        }
    }
}

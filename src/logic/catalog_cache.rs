use crate::datasources::CatalogSource;
use crate::error::Result;
use crate::logic::suitability::rank_crops;
use crate::models::{CropMatch, CropProfile, SoilSample};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Process-wide crop catalog, fetched at most once.
///
/// The first successful fetch wins and is immutable afterwards. A failed fetch
/// leaves the cache empty so the next caller retries.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    crops: OnceCell<Arc<[CropProfile]>>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            crops: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<Arc<[CropProfile]>> {
        let crops = self
            .crops
            .get_or_try_init(|| async {
                let crops = self.source.fetch_crops().await?;
                tracing::info!(
                    source = %self.source.describe(),
                    count = crops.len(),
                    "Loaded crop catalog"
                );
                Ok::<_, crate::error::NutriRootError>(Arc::from(crops))
            })
            .await?;

        Ok(Arc::clone(crops))
    }

    /// Rank the cached catalog for a sample, fetching it first if needed.
    pub async fn rank(&self, sample: &SoilSample) -> Result<Vec<CropMatch>> {
        let catalog = self.get().await?;
        Ok(rank_crops(sample, &catalog))
    }

    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }
}

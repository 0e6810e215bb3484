pub mod file_catalog;
pub mod remote_catalog;

pub use file_catalog::FileCatalog;
pub use remote_catalog::RemoteCatalog;

use crate::config::CatalogConfig;
use crate::error::{NutriRootError, Result};
use crate::models::CropProfile;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where the crop catalog comes from. Implementations only fetch; scoring never
/// touches a source directly.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_crops(&self) -> Result<Vec<CropProfile>>;

    /// Whether the source is reachable, without loading the catalog if avoidable.
    async fn test_connection(&self) -> Result<bool> {
        Ok(!self.fetch_crops().await?.is_empty())
    }

    /// Short human-readable location, for logs and `check`.
    fn describe(&self) -> String;
}

/// Pick the configured source. A local file takes precedence over a URL.
pub fn catalog_source(config: &CatalogConfig) -> Result<Arc<dyn CatalogSource>> {
    if let Some(ref path) = config.path {
        return Ok(Arc::new(FileCatalog::new(path.clone())));
    }

    match config.url.as_deref() {
        Some(url) if !url.is_empty() => Ok(Arc::new(RemoteCatalog::new(config.clone())?)),
        _ => Err(NutriRootError::Config(
            "No crop catalog configured. Set catalog.path or catalog.url in config.yaml, \
             or pass --catalog."
                .into(),
        )),
    }
}

/// A catalog document: either a list of crops or a map of document id to crop.
///
/// Entries stay undecoded until `into_crops`, so one malformed entry is skipped
/// instead of rejecting the whole document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl CatalogDocument {
    /// Decode into catalog order. Map entries are ordered by key and take
    /// their key as id when the entry has none. Entries that do not decode
    /// as a crop profile are logged and dropped.
    pub fn into_crops(self) -> Vec<CropProfile> {
        let entries: Vec<(Option<String>, Value)> = match self {
            CatalogDocument::List(values) => values.into_iter().map(|v| (None, v)).collect(),
            CatalogDocument::Map(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
        };

        let crops: Vec<CropProfile> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, (key, value))| {
                match serde_json::from_value::<CropProfile>(value) {
                    Ok(mut crop) => {
                        if let Some(key) = key.filter(|_| crop.id.is_empty()) {
                            crop.id = key;
                        }
                        Some(crop)
                    }
                    Err(e) => {
                        tracing::warn!(
                            index,
                            key = key.as_deref().unwrap_or_default(),
                            "Skipping malformed catalog entry: {}",
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        for crop in &crops {
            match crop.soil_requirements {
                None => tracing::warn!(
                    crop = %crop.display_name(),
                    "Catalog entry has no soil requirements"
                ),
                Some(ref req) => {
                    let missing = req.missing();
                    if !missing.is_empty() {
                        tracing::warn!(
                            crop = %crop.display_name(),
                            missing = ?missing,
                            "Catalog entry has incomplete soil requirements"
                        );
                    }
                }
            }
        }

        crops
    }
}

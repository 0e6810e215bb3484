use super::{CatalogDocument, CatalogSource};
use crate::error::{NutriRootError, Result};
use crate::models::CropProfile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Crop catalog exported to a local JSON or YAML file.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }

    pub fn parse(path: &Path, content: &str) -> Result<Vec<CropProfile>> {
        let document: CatalogDocument = if Self::is_yaml(path) {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        Ok(document.into_crops())
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_crops(&self) -> Result<Vec<CropProfile>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            NutriRootError::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Self::parse(&self.path, &content)
    }

    async fn test_connection(&self) -> Result<bool> {
        Ok(tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

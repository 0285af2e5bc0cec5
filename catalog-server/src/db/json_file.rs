//! Flat JSON file store
//!
//! The document is written pretty-printed to a temporary sibling file and
//! renamed over the target, so readers never see a half-written file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{CatalogDocument, CatalogStore, StoreResult};

/// Default file name inside the data directory
pub const DB_FILE_NAME: &str = "db.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `{data_dir}/db.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DB_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_atomic(&self, document: &CatalogDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.temp_path();
        fs::write(&tmp, &bytes).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "json"
    }

    async fn load(&self) -> StoreResult<CatalogDocument> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let document = CatalogDocument::default();
                self.write_atomic(&document).await?;
                tracing::info!(path = %self.path.display(), "Created empty catalog file");
                Ok(document)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &CatalogDocument) -> StoreResult<()> {
        self.write_atomic(document).await
    }
}

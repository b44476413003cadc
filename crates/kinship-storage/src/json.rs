//! JSON file storage backend
//!
//! The whole collection lives in one pretty-printed `{"persons": [...]}`
//! document that is read and rewritten on every operation.

use crate::error::{StorageError, StorageResult};
use crate::traits::FamilyRepository;
use async_trait::async_trait;
use kinship_core::{Family, FamilyData};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON file storage backend
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "family.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Warn about parent ids that point at nobody; returns how many were found.
///
/// Such links are left in place and treated as absent by every query.
fn report_dangling_parents(data: &FamilyData, path: &Path) -> usize {
    let dangling = Family::new(&data.persons).dangling_parent_ids();
    for (child, parent) in &dangling {
        tracing::warn!(
            "{:?}: person {} lists unknown parent {}",
            path,
            child,
            parent
        );
    }
    dangling.len()
}

#[async_trait]
impl FamilyRepository for JsonFileStorage {
    async fn health_check(&self) -> StorageResult<bool> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    async fn load(&self) -> StorageResult<FamilyData> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No data file at {:?}, starting empty", self.path);
                return Ok(FamilyData::default());
            }
            Err(e) => {
                tracing::error!("Error reading family data from {:?}: {}", self.path, e);
                return Err(e.into());
            }
        };

        if content.trim().is_empty() {
            return Ok(FamilyData::default());
        }

        let data: FamilyData = serde_json::from_str(&content).map_err(|e| {
            tracing::error!("Error parsing family data from {:?}: {}", self.path, e);
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        report_dangling_parents(&data, &self.path);
        Ok(data)
    }

    async fn save(&self, data: &FamilyData) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Saved {} persons to {:?}", data.persons.len(), self.path);
        Ok(())
    }
}

use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use tokio::sync::RwLock;

use crate::domain::company_info::CompanyInfo;

use super::{write_atomically, StoreError};

/// Permanent company name -> `CompanyInfo` map, mirrored to a single JSON file.
///
/// Loaded once at startup; every insert rewrites the whole file. Entries are
/// never expired.
pub struct CompanyCache {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, CompanyInfo>>,
}

impl CompanyCache {
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match tokio::fs::read(&path).await {
            Ok(contents) => match serde_json::from_slice(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Failed to parse company cache {:?}: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Failed to read company cache {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        log::info!("Loaded {} cached companies from {:?}", entries.len(), path);

        CompanyCache {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub async fn get(&self, company: &str) -> Option<CompanyInfo> {
        self.entries.read().await.get(company).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Stores `info` and flushes the whole cache to disk. The in-memory entry
    /// is kept even when the flush fails.
    pub async fn insert(&self, company: &str, info: CompanyInfo) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(company.to_string(), info);

        let contents = serde_json::to_vec_pretty(&*entries)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }
        write_atomically(&self.path, &contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::CompanyCache;
    use crate::domain::company_info::CompanyInfo;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompanyCache::load(dir.path().join("companyCache.json")).await;

        assert_eq!(cache.len().await, 0);
        assert_eq!(cache.get("Acme").await, None);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companyCache.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = CompanyCache::load(&path).await;

        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn insert_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("companyCache.json");
        let info = CompanyInfo::unreachable("Acme", "https://www.acme.com");

        let cache = CompanyCache::load(&path).await;
        cache.insert("Acme", info.clone()).await.unwrap();

        let reloaded = CompanyCache::load(&path).await;
        assert_eq!(reloaded.get("Acme").await, Some(info));
    }

    #[tokio::test]
    async fn file_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companyCache.json");

        let cache = CompanyCache::load(&path).await;
        cache
            .insert(
                "Acme",
                CompanyInfo::extraction_failed("Acme", "https://acme.com", "https://acme.com/about"),
            )
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["Acme"]["aboutPage"], "https://acme.com/about");
        assert_eq!(json["Acme"]["industry"], serde_json::Value::Null);
    }
}

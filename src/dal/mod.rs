pub mod company_cache;
pub mod review_store;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Company name {0:?} cannot be used as a storage key")]
    InvalidCompanyName(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Writes `contents` next to `path` under a unique name and renames it into
/// place, so readers see either the old file or the new one.
pub(crate) async fn write_atomically(
    path: &std::path::Path,
    contents: &[u8],
) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| StoreError::io(&tmp_path, e))?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(StoreError::io(path, e));
    }

    Ok(())
}

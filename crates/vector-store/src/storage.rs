use crate::error::Result;
use std::path::Path;

/// Read a persisted artifact in full.
pub async fn read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path.as_ref()).await?)
}

/// Whether a persisted artifact exists at `path`.
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Write `bytes` to `path` without ever exposing a partial file.
///
/// Parent directories are created as needed; the bytes go to a sibling
/// `*.tmp` file first and are renamed into place. Readers see either the
/// previous complete file or the new complete file.
pub async fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    if let Err(err) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

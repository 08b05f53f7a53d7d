//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the data directory exists, creating it if needed.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_ok() {
        debug!(%data_dir, "data directory present");
        return Ok(());
    }
    warn!(%data_dir, "data directory not found; creating it");
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

/// Join the data directory and the store file name into one path string.
pub fn store_path(data_dir: &str, file_name: &str) -> String {
    Path::new(data_dir).join(file_name).to_string_lossy().into_owned()
}

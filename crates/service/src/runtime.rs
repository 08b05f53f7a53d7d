//! Runtime environment helpers
//!
//! Opens the persistent store and wires the survey service on top of it, so
//! binary crates do not depend on storage details.

use std::sync::Arc;

use tracing::info;

use crate::storage::kv_store::FileKvStore;
use crate::survey::{FileSurveyService, KvSurveyRepository, SurveyRepository, SurveyService};

/// Ensure the data directory exists, open `<data_dir>/<file_name>` and make
/// sure the survey collection is initialized.
pub async fn open_survey_service(data_dir: &str, file_name: &str) -> anyhow::Result<Arc<FileSurveyService>> {
    common::env::ensure_data_dir(data_dir).await?;
    let path = common::env::store_path(data_dir, file_name);
    let kv = FileKvStore::new(&path).await?;
    let repo = Arc::new(KvSurveyRepository::new(kv));
    repo.ensure_initialized().await?;
    info!(%path, "survey store ready");
    Ok(Arc::new(SurveyService::new(repo)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reopening_keeps_surveys() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("svc_runtime_{}", uuid::Uuid::new_v4()));
        let dir = dir.to_string_lossy().into_owned();

        let svc = open_survey_service(&dir, "store.json").await?;
        let s = svc.create_survey(vec!["still there?".into()]).await?;
        drop(svc);

        let svc = open_survey_service(&dir, "store.json").await?;
        let results = svc.get_results(&s.id).await?;
        assert_eq!(results[0].question, "still there?");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}

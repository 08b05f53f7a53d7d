use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::kv_store::KvStore;
use crate::survey::domain::{Survey, SurveyId};

/// Store key holding the whole `id -> Survey` collection.
pub const SURVEYS_KEY: &str = "surveys";

#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Create the empty collection if the store has none yet.
    async fn ensure_initialized(&self) -> Result<(), ServiceError>;
    async fn load_all(&self) -> Result<HashMap<SurveyId, Survey>, ServiceError>;
    async fn load(&self, id: &str) -> Result<Survey, ServiceError>;
    async fn save(&self, survey: &Survey) -> Result<(), ServiceError>;
    /// Load, mutate and persist one survey as a single atomic step.
    /// When `f` fails nothing is written.
    async fn update<F>(&self, id: &str, f: F) -> Result<Survey, ServiceError>
    where
        F: FnOnce(&mut Survey) -> Result<(), ServiceError> + Send;
}

/// Repository over any `KvStore`, keeping every survey under [`SURVEYS_KEY`].
pub struct KvSurveyRepository<S: KvStore> {
    store: Arc<S>,
}

impl<S: KvStore> KvSurveyRepository<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }
}

/// The stored collection with entries left as raw JSON, so that one
/// malformed record does not affect reads or writes of the others.
type RawCollection = serde_json::Map<String, Value>;

fn raw_collection(value: Option<Value>) -> Result<RawCollection, ServiceError> {
    match value {
        None | Some(Value::Null) => Ok(RawCollection::new()),
        Some(Value::Object(entries)) => Ok(entries),
        Some(_) => Err(ServiceError::Db("surveys record is not a JSON object".into())),
    }
}

fn decode_survey(id: &str, raw: &Value) -> Result<Survey, ServiceError> {
    let survey: Survey = serde_json::from_value(raw.clone())
        .map_err(|e| ServiceError::Db(format!("invalid survey record {}: {}", id, e)))?;
    survey.check_consistency()?;
    Ok(survey)
}

fn encode_survey(survey: &Survey) -> Result<Value, ServiceError> {
    serde_json::to_value(survey).map_err(|e| ServiceError::Db(e.to_string()))
}

#[async_trait]
impl<S: KvStore> SurveyRepository for KvSurveyRepository<S> {
    async fn ensure_initialized(&self) -> Result<(), ServiceError> {
        if self.store.get(SURVEYS_KEY).await?.is_none() {
            self.store.set(SURVEYS_KEY, Value::Object(Default::default())).await?;
            info!(key = SURVEYS_KEY, "initialized empty survey collection");
        }
        Ok(())
    }

    /// Every readable survey; damaged records are logged and skipped.
    async fn load_all(&self) -> Result<HashMap<SurveyId, Survey>, ServiceError> {
        let surveys = raw_collection(self.store.get(SURVEYS_KEY).await?)?;
        let mut out = HashMap::with_capacity(surveys.len());
        for (id, raw) in &surveys {
            match decode_survey(id, raw) {
                Ok(survey) => {
                    out.insert(id.clone(), survey);
                }
                Err(e) => warn!(survey_id = %id, error = %e, "skipping unreadable survey record"),
            }
        }
        Ok(out)
    }

    async fn load(&self, id: &str) -> Result<Survey, ServiceError> {
        let surveys = raw_collection(self.store.get(SURVEYS_KEY).await?)?;
        let raw = surveys.get(id).ok_or_else(|| ServiceError::not_found("Survey", id))?;
        decode_survey(id, raw)
    }

    async fn save(&self, survey: &Survey) -> Result<(), ServiceError> {
        survey.check_consistency()?;
        let id = survey.id.clone();
        let entry = encode_survey(survey)?;
        self.store
            .modify(SURVEYS_KEY, move |current| {
                let mut surveys = raw_collection(current)?;
                surveys.insert(id, entry);
                Ok(Value::Object(surveys))
            })
            .await?;
        debug!(survey_id = %survey.id, "survey saved");
        Ok(())
    }

    async fn update<F>(&self, id: &str, f: F) -> Result<Survey, ServiceError>
    where
        F: FnOnce(&mut Survey) -> Result<(), ServiceError> + Send,
    {
        let mut updated: Option<Survey> = None;
        self.store
            .modify(SURVEYS_KEY, |current| {
                let mut surveys = raw_collection(current)?;
                let raw = surveys.get(id).ok_or_else(|| ServiceError::not_found("Survey", id))?;
                let mut survey = decode_survey(id, raw)?;
                f(&mut survey)?;
                survey.check_consistency()?;
                surveys.insert(id.to_string(), encode_survey(&survey)?);
                updated = Some(survey);
                Ok(Value::Object(surveys))
            })
            .await?;
        updated.ok_or_else(|| ServiceError::Db(format!("survey {} was not written", id)))
    }
}

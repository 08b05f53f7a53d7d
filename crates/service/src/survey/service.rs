use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::kv_store::FileKvStore;
use crate::survey::domain::{QuestionResult, Survey};
use crate::survey::input::boolean_answers;
use crate::survey::repository::{KvSurveyRepository, SurveyRepository};

/// Application service for the survey lifecycle: create, take, tally.
pub struct SurveyService<R: SurveyRepository> {
    repo: Arc<R>,
}

/// The service wired to the file-backed store, as used by the server.
pub type FileSurveyService = SurveyService<KvSurveyRepository<FileKvStore>>;

impl<R: SurveyRepository> SurveyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate the questions, then persist a new survey with zeroed tallies.
    #[instrument(skip(self, questions), fields(question_count = questions.len()))]
    pub async fn create_survey(&self, questions: Vec<String>) -> Result<Survey, ServiceError> {
        let survey = Survey::new(questions)?;
        self.repo.save(&survey).await?;
        info!(survey_id = %survey.id, "survey_created");
        Ok(survey)
    }

    /// Record one submission. Unknown id, a non-boolean element or a length
    /// mismatch rejects the whole submission and leaves the tallies as they were.
    #[instrument(skip(self, responses), fields(survey_id = %id, response_count = responses.len()))]
    pub async fn submit_responses(&self, id: &str, responses: Vec<Value>) -> Result<Survey, ServiceError> {
        let survey = self
            .repo
            .update(id, move |survey| {
                let answers = boolean_answers(&responses)?;
                survey.record_responses(&answers)
            })
            .await?;
        info!(survey_id = %survey.id, "responses_recorded");
        Ok(survey)
    }

    /// Per-question tallies in question order.
    pub async fn get_results(&self, id: &str) -> Result<Vec<QuestionResult>, ServiceError> {
        Ok(self.repo.load(id).await?.results())
    }
}

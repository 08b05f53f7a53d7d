use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub type SurveyId = String;

/// Per-question answer counts, serialized as `{"true": n, "false": m}`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    #[serde(rename = "true")]
    pub true_count: u64,
    #[serde(rename = "false")]
    pub false_count: u64,
}

impl Tally {
    pub fn record(&mut self, answer: bool) {
        if answer {
            self.true_count += 1;
        } else {
            self.false_count += 1;
        }
    }
}

/// A set of yes/no questions with one tally per question.
///
/// `responses[i]` always counts the answers given to `questions[i]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Survey {
    pub id: SurveyId,
    pub questions: Vec<String>,
    pub responses: Vec<Tally>,
}

/// One row of the results view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionResult {
    pub question: String,
    pub responses: Tally,
}

impl Survey {
    /// Build a fresh survey with a new id and zeroed tallies.
    pub fn new(questions: Vec<String>) -> Result<Self, ServiceError> {
        if questions.is_empty() {
            return Err(ServiceError::validation("Empty question list not allowed"));
        }
        if questions.iter().any(|q| q.is_empty()) {
            return Err(ServiceError::validation("Blank questions not allowed."));
        }
        let responses = vec![Tally::default(); questions.len()];
        Ok(Self { id: Uuid::new_v4().to_string(), questions, responses })
    }

    /// Record one full submission. The length is checked before any tally moves.
    pub fn record_responses(&mut self, answers: &[bool]) -> Result<(), ServiceError> {
        if answers.len() != self.questions.len() {
            return Err(ServiceError::Validation(format!(
                "Expected {} responses, got {}",
                self.questions.len(),
                answers.len()
            )));
        }
        for (tally, answer) in self.responses.iter_mut().zip(answers) {
            tally.record(*answer);
        }
        Ok(())
    }

    pub fn results(&self) -> Vec<QuestionResult> {
        self.questions
            .iter()
            .zip(&self.responses)
            .map(|(question, tally)| QuestionResult { question: question.clone(), responses: *tally })
            .collect()
    }

    /// Reject persisted records whose tallies are not aligned with their questions.
    pub fn check_consistency(&self) -> Result<(), ServiceError> {
        if self.responses.len() != self.questions.len() {
            return Err(ServiceError::Db(format!(
                "survey {} has {} questions but {} tallies",
                self.id,
                self.questions.len(),
                self.responses.len()
            )));
        }
        Ok(())
    }
}

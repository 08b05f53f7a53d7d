//! Survey lifecycle: domain types, request decoding, persistence, service.

pub mod domain;
pub mod input;
pub mod repository;
pub mod service;

pub use domain::{QuestionResult, Survey, SurveyId, Tally};
pub use input::{CreateSurveyRequest, EncodedList, TakeSurveyRequest};
pub use repository::{KvSurveyRepository, SurveyRepository, SURVEYS_KEY};
pub use service::{FileSurveyService, SurveyService};

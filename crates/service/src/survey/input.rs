//! Request schemas for the survey endpoints.
//!
//! Legacy clients send list fields JSON-encoded inside a string
//! (`{"questions": "[\"a\", \"b\"]"}`); newer clients send the array itself.
//! Both shapes decode to the same list of JSON values.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ServiceError;

/// A list field as it arrives on the wire.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EncodedList {
    Encoded(String),
    Native(Vec<Value>),
}

impl EncodedList {
    /// Decode to the list elements. `what` names the expected element type in errors.
    pub fn decode(self, what: &str) -> Result<Vec<Value>, ServiceError> {
        match self {
            Self::Native(items) => Ok(items),
            Self::Encoded(raw) => {
                let parsed: Value = serde_json::from_str(&raw).map_err(|e| ServiceError::Parse(e.to_string()))?;
                match parsed {
                    Value::Array(items) => Ok(items),
                    // JSON `null` counts as an empty list
                    Value::Null => Ok(Vec::new()),
                    _ => Err(ServiceError::Validation(format!("Expected a JSON array of {}", what))),
                }
            }
        }
    }
}

/// Body of `POST /survey/new`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSurveyRequest {
    #[serde(default)]
    pub questions: Option<EncodedList>,
}

impl CreateSurveyRequest {
    pub fn into_questions(self) -> Result<Vec<String>, ServiceError> {
        let items = self
            .questions
            .ok_or_else(|| ServiceError::validation("Please provide list of questions for new survey"))?
            .decode("strings")?;
        items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                _ => Err(ServiceError::validation("Questions must be strings")),
            })
            .collect()
    }
}

/// Body of `POST /survey/:id/take`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TakeSurveyRequest {
    #[serde(default)]
    pub responses: Option<EncodedList>,
}

impl TakeSurveyRequest {
    /// Decoded but not yet type-checked; see [`boolean_answers`].
    pub fn into_responses(self) -> Result<Vec<Value>, ServiceError> {
        self.responses
            .ok_or_else(|| ServiceError::validation("Please provide list of responses"))?
            .decode("booleans")
    }
}

/// Every element must be a JSON boolean; otherwise nothing is returned.
pub fn boolean_answers(values: &[Value]) -> Result<Vec<bool>, ServiceError> {
    values
        .iter()
        .map(|v| v.as_bool().ok_or_else(|| ServiceError::validation("Responses must be booleans")))
        .collect()
}

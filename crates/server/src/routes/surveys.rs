use axum::{extract::State, Json};
use serde_json::{json, Value};
use service::survey::{CreateSurveyRequest, QuestionResult, TakeSurveyRequest};

use crate::errors::ApiError;
use crate::extract::{JsonOrForm, SurveyPath};
use crate::routes::ServerState;

/// 创建问卷：`questions` 可以是 JSON 字符串或原生数组
pub async fn create_survey(
    State(state): State<ServerState>,
    JsonOrForm(input): JsonOrForm<CreateSurveyRequest>,
) -> Result<Json<Value>, ApiError> {
    let questions = input.into_questions()?;
    let survey = state.surveys.create_survey(questions).await?;
    Ok(Json(json!({ "success": format!("New survey created: {}", survey.id) })))
}

/// 提交答卷
pub async fn take_survey(
    State(state): State<ServerState>,
    SurveyPath(id): SurveyPath,
    JsonOrForm(input): JsonOrForm<TakeSurveyRequest>,
) -> Result<Json<Value>, ApiError> {
    let responses = input.into_responses()?;
    state.surveys.submit_responses(&id, responses).await?;
    Ok(Json(json!({ "success": "Responses successfully recorded." })))
}

/// 查询统计结果
pub async fn survey_results(
    State(state): State<ServerState>,
    SurveyPath(id): SurveyPath,
) -> Result<Json<Vec<QuestionResult>>, ApiError> {
    Ok(Json(state.surveys.get_results(&id).await?))
}

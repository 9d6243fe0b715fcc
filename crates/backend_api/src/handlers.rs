use axum::{extract::State, response::IntoResponse, Json};
use finance_engine::{
    build_health_report, compute_health_score, compute_metrics, compute_summary, FinancialInput,
};
use models::{Metrics, NewResult};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState, Result};

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub input: FinancialInput,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub save_result: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub metrics: Metrics,
    pub ai_advice: String,
    pub advice_source: String,
    pub health_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
}

/// POST /api/analyze
/// Computes metrics and advice, optionally saving the analysis for a user
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse> {
    let input = req.input.validate()?;
    let metrics = compute_metrics(&input.income, &input.expenses);
    let health = compute_health_score(&metrics, metrics.income_items.len());

    let advice = state
        .advisor
        .get_advice(&metrics, input.goals.as_deref())
        .await;

    let user_id = req
        .user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let mut result_id = None;
    if let (true, Some(user_id)) = (req.save_result, user_id) {
        let snapshot = NewResult {
            user_id,
            user_name: req.user_name,
            income: input.income,
            expenses: input.expenses,
            goals: input.goals,
            metrics: metrics.clone(),
            ai_advice: advice.text.clone(),
            health_score: Some(health.score),
        };
        match state.repo.save_result(snapshot).await {
            Ok(saved) => result_id = Some(saved.id),
            Err(e) => tracing::warn!(error = %e, "Failed to save analysis result"),
        }
    }

    Ok(Json(AnalyzeResponse {
        success: true,
        metrics,
        ai_advice: advice.text,
        advice_source: advice.source.label().to_string(),
        health_score: health.score,
        result_id,
    }))
}

/// POST /api/summary
/// Totals only; every expense counts as an outflow
pub async fn summary(Json(input): Json<FinancialInput>) -> Result<impl IntoResponse> {
    let input = input.validate()?;
    Ok(Json(compute_summary(&input.income, &input.expenses)))
}

/// POST /api/health-report
pub async fn health_report(Json(input): Json<FinancialInput>) -> Result<impl IntoResponse> {
    let input = input.validate()?;
    let metrics = compute_metrics(&input.income, &input.expenses);
    Ok(Json(build_health_report(metrics)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub user: String,
    pub ai_response: String,
}

/// POST /api/chat
/// Free-form finance question answered by the configured AI provider
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse> {
    let user_message = req
        .user_message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Missing userMessage".to_string()))?;

    let ai_response = state.advisor.chat(&user_message).await?;

    Ok(Json(ChatResponse {
        success: true,
        user: user_message,
        ai_response,
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "finance-coach-api"
    }))
}

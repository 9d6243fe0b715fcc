use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::ApiError, state::AppState, Result};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{field} is required")))
}

/// POST /api/users
/// Registers a user; emails are unique regardless of case
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    let name = required(req.name, "Name")?;
    let email = required(req.email, "Email")?;

    let user = state.repo.create_user(&name, &email).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "user": user }))))
}

/// POST /api/users/login
/// Looks a user up by email. This is not authentication.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = required(req.email, "Email")?;
    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user registered with email {email}")))?;
    Ok(Json(json!({ "success": true, "user": user })))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.repo.list_users().await?;
    Ok(Json(json!({ "users": users })))
}

/// DELETE /api/users/:user_id
/// Deletes a user together with their saved results
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.repo.delete_user(&user_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/users/:user_id/results
pub async fn get_user_results(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    let results = state.repo.results_for_user(&user_id).await?;
    Ok(Json(json!({ "results": results })))
}

/// GET /api/results
pub async fn list_results(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let results = state.repo.list_results().await?;
    Ok(Json(json!({ "results": results })))
}

/// GET /api/results/:result_id
pub async fn get_result(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<impl IntoResponse> {
    let result = state
        .repo
        .get_result(&result_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Result {} not found", result_id)))?;
    Ok(Json(json!({ "result": result })))
}

/// DELETE /api/results/:result_id
pub async fn delete_result(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.repo.delete_result(&result_id).await?;
    Ok(Json(json!({ "success": true })))
}

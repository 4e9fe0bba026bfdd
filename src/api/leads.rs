use crate::api::AppState;
use crate::domain::lead::RawLeadForm;
use crate::domain::submission::SubmissionResult;
use crate::error::{AppError, Result};
use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

/// Accepts a urlencoded form post from the lead page.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a urlencoded form.
pub async fn submit_form(
    State(state): State<AppState>,
    form: std::result::Result<Form<RawLeadForm>, FormRejection>,
) -> Result<impl IntoResponse> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(respond(&state, form).await)
}

/// Accepts the same fields as a JSON object.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a JSON object.
pub async fn submit_json(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RawLeadForm>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(form) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(respond(&state, form).await)
}

async fn respond(state: &AppState, form: RawLeadForm) -> (StatusCode, Json<SubmissionResult>) {
    let result = state.submission_service.submit(&SubmissionResult::Idle, form).await;
    let status = match &result {
        SubmissionResult::Success { .. } | SubmissionResult::Idle => StatusCode::OK,
        SubmissionResult::Error { field_errors: Some(_), .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionResult::Error { field_errors: None, .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(result))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    config::get_config,
    dto::answer_dto::SubmitAnswerPayload,
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/master-answers",
    responses(
        (status = 200, description = "All master answers")
    )
)]
#[axum::debug_handler]
pub async fn list_master_answers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let answers = state.answer_service.list_master().await?;
    Ok(Json(answers))
}

#[utoipa::path(
    get,
    path = "/api/master-answers/{question_id}",
    params(
        ("question_id" = String, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Master answer for the question"),
        (status = 404, description = "No master answer found for this questionId")
    )
)]
#[axum::debug_handler]
pub async fn get_master_answer(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<impl IntoResponse> {
    let answer = state
        .answer_service
        .get_master_by_question(&question_id)
        .await?;
    Ok(Json(answer))
}

#[utoipa::path(
    get,
    path = "/api/answers",
    responses(
        (status = 200, description = "All student answers")
    )
)]
#[axum::debug_handler]
pub async fn list_student_answers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let answers = state.answer_service.list_student().await?;
    Ok(Json(answers))
}

#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = SubmitAnswerPayload,
    responses(
        (status = 201, description = "Answer stored"),
        (status = 400, description = "Missing required field")
    )
)]
#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAnswerPayload>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|_| Error::BadRequest("All fields are required".to_string()))?;

    let user_id = &get_config().submission_user_id;
    let answer = state.answer_service.submit(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

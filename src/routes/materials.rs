use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/subtopic/{subtopic_id}",
    params(
        ("subtopic_id" = String, Path, description = "Subtopic ID")
    ),
    responses(
        (status = 200, description = "Learning material for the subtopic"),
        (status = 404, description = "No learning material found for this subtopic")
    )
)]
#[axum::debug_handler]
pub async fn material_for_subtopic(
    State(state): State<AppState>,
    Path(subtopic_id): Path<String>,
) -> Result<impl IntoResponse> {
    let material = state.material_service.for_subtopic(&subtopic_id).await?;
    Ok(Json(material))
}

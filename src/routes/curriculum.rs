use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/class/{class_id}/subjects",
    params(
        ("class_id" = String, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Subjects of the class"),
        (status = 404, description = "Class not found or has no subjects")
    )
)]
#[axum::debug_handler]
pub async fn subjects_for_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse> {
    let subjects = state.curriculum_service.subjects_of_class(&class_id).await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/subject/{subject_id}/domains",
    params(
        ("subject_id" = String, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Domains of the subject"),
        (status = 404, description = "Subject not found or has no domains")
    )
)]
#[axum::debug_handler]
pub async fn domains_for_subject(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<impl IntoResponse> {
    let domains = state
        .curriculum_service
        .domains_of_subject(&subject_id)
        .await?;
    Ok(Json(domains))
}

#[utoipa::path(
    get,
    path = "/api/unit/{unit_id}",
    params(
        ("unit_id" = String, Path, description = "Unit ID")
    ),
    responses(
        (status = 200, description = "Chapters of the unit"),
        (status = 404, description = "Unit not found or has no chapter_ids")
    )
)]
#[axum::debug_handler]
pub async fn chapters_for_unit(
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse> {
    let chapters = state.curriculum_service.chapters_of_unit(&unit_id).await?;
    Ok(Json(chapters))
}

#[utoipa::path(
    get,
    path = "/api/chapter/{chapter_id}",
    params(
        ("chapter_id" = String, Path, description = "Chapter ID")
    ),
    responses(
        (status = 200, description = "Topics of the chapter"),
        (status = 404, description = "Chapter not found or has no topic_ids")
    )
)]
#[axum::debug_handler]
pub async fn topics_for_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<String>,
) -> Result<impl IntoResponse> {
    let topics = state
        .curriculum_service
        .topics_of_chapter(&chapter_id)
        .await?;
    Ok(Json(topics))
}

#[utoipa::path(
    get,
    path = "/api/topic/{topic_id}",
    params(
        ("topic_id" = String, Path, description = "Topic ID")
    ),
    responses(
        (status = 200, description = "Subtopics of the topic"),
        (status = 404, description = "Topic not found or has no subtopic_ids")
    )
)]
#[axum::debug_handler]
pub async fn subtopics_for_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<impl IntoResponse> {
    let subtopics = state
        .curriculum_service
        .subtopics_of_topic(&topic_id)
        .await?;
    Ok(Json(subtopics))
}

#[utoipa::path(
    get,
    path = "/api/unit-full/{unit_id}",
    params(
        ("unit_id" = String, Path, description = "Unit ID")
    ),
    responses(
        (status = 200, description = "Unit subtree with all fields"),
        (status = 404, description = "Unit not found or has no chapters")
    )
)]
#[axum::debug_handler]
pub async fn unit_tree(
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse> {
    let tree = state.curriculum_service.unit_tree(&unit_id).await?;
    Ok(Json(tree))
}

#[utoipa::path(
    get,
    path = "/api/unit-full-names/{unit_id}",
    params(
        ("unit_id" = String, Path, description = "Unit ID")
    ),
    responses(
        (status = 200, description = "Unit subtree, names only"),
        (status = 404, description = "Unit not found or has no chapters")
    )
)]
#[axum::debug_handler]
pub async fn unit_name_tree(
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse> {
    let tree = state.curriculum_service.unit_name_tree(&unit_id).await?;
    Ok(Json(tree))
}

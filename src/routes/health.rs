use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running")
    )
)]
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    "Tutor backend server is running."
}

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tutor_backend::{
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    routes,
    store::CosmosClient,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store = CosmosClient::new(
        &config.cosmos_endpoint,
        &config.cosmos_key,
        &config.cosmos_database,
    )?;
    let app_state = AppState::new(store);

    let app = Router::new()
        .route("/", get(routes::health::root))
        .route("/api/master-answers", get(routes::answers::list_master_answers))
        .route(
            "/api/master-answers/:question_id",
            get(routes::answers::get_master_answer),
        )
        .route(
            "/api/answers",
            get(routes::answers::list_student_answers).post(routes::answers::submit_answer),
        )
        .route(
            "/api/class/:class_id/subjects",
            get(routes::curriculum::subjects_for_class),
        )
        .route(
            "/api/subject/:subject_id/domains",
            get(routes::curriculum::domains_for_subject),
        )
        .route("/api/unit/:unit_id", get(routes::curriculum::chapters_for_unit))
        .route(
            "/api/chapter/:chapter_id",
            get(routes::curriculum::topics_for_chapter),
        )
        .route(
            "/api/topic/:topic_id",
            get(routes::curriculum::subtopics_for_topic),
        )
        .route("/api/unit-full/:unit_id", get(routes::curriculum::unit_tree))
        .route(
            "/api/unit-full-names/:unit_id",
            get(routes::curriculum::unit_name_tree),
        )
        .route(
            "/api/subtopic/:subtopic_id",
            get(routes::materials::material_for_subtopic),
        )
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

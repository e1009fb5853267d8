pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use crate::services::{
    answer_service::AnswerService, curriculum_service::CurriculumService,
    material_service::MaterialService,
};
use crate::store::{collections, CosmosClient};

#[derive(Clone)]
pub struct AppState {
    pub answer_service: AnswerService,
    pub curriculum_service: CurriculumService,
    pub material_service: MaterialService,
}

impl AppState {
    pub fn new(store: CosmosClient) -> Self {
        let answer_service = AnswerService::new(
            store.container(collections::MASTER_ANSWERS),
            store.container(collections::STUDENT_ANSWERS),
        );
        let curriculum_service = CurriculumService::new(
            store.container(collections::CLASS_CLUSTER),
            store.container(collections::TOPIC_CLUSTER),
        );
        let material_service =
            MaterialService::new(store.container(collections::LEARNING_MATERIALS));

        Self {
            answer_service,
            curriculum_service,
            material_service,
        }
    }
}

pub mod answer_service;
pub mod curriculum_service;
pub mod material_service;

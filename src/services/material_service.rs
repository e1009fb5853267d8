use crate::error::{Error, Result};
use crate::models::learning_material::LearningMaterial;
use crate::store::{query, Container};

#[derive(Clone)]
pub struct MaterialService {
    materials: Container,
}

impl MaterialService {
    pub fn new(materials: Container) -> Self {
        Self { materials }
    }

    /// Learning material shares its id with the subtopic. The projection is
    /// fixed so responses carry exactly the published field set.
    pub async fn for_subtopic(&self, subtopic_id: &str) -> Result<LearningMaterial> {
        self.materials
            .query_first(&query::by_id_projected(
                LearningMaterial::PROJECTION,
                subtopic_id,
            ))
            .await?
            .ok_or_else(|| {
                Error::NotFound("No learning material found for this subtopic".to_string())
            })
    }
}

use serde::{Deserialize, Serialize};

/// Learning material attached to a subtopic (shared id). Responses carry
/// exactly these fields; anything else on the stored document is dropped by
/// the projection, and fields missing in the store default to empty values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningMaterial {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub material_type: String,
    #[serde(rename = "questionIds", default)]
    pub question_ids: Vec<String>,
}

impl LearningMaterial {
    pub const PROJECTION: &'static [&'static str] =
        &["id", "title", "url", "description", "type", "questionIds"];
}

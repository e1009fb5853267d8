use serde::{Deserialize, Serialize};
use validator::Validate;

/// Submission body for `POST /api/answers`. Fields are optional at the
/// serde level so a missing field surfaces as the collective "All fields
/// are required" validation failure rather than a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerPayload {
    #[validate(required, length(min = 1))]
    #[serde(rename = "questionId")]
    pub question_id: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "questionText")]
    pub question_text: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "answerText")]
    pub answer_text: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "subTopic")]
    pub sub_topic: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "Topic")]
    pub topic: Option<String>,
}

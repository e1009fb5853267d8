use serde_json::Value;

use crate::dto::answer_dto::SubmitAnswerPayload;
use crate::error::{Error, Result};
use crate::models::student_answer::StudentAnswer;
use crate::store::{query, Container};

#[derive(Clone)]
pub struct AnswerService {
    master_answers: Container,
    student_answers: Container,
}

impl AnswerService {
    pub fn new(master_answers: Container, student_answers: Container) -> Self {
        Self {
            master_answers,
            student_answers,
        }
    }

    pub async fn list_master(&self) -> Result<Vec<Value>> {
        self.master_answers.list_all().await
    }

    /// The store does not enforce questionId uniqueness; the first match is
    /// treated as canonical.
    pub async fn get_master_by_question(&self, question_id: &str) -> Result<Value> {
        self.master_answers
            .query_first(&query::by_field("questionId", question_id))
            .await?
            .ok_or_else(|| {
                Error::NotFound("No master answer found for this questionId".to_string())
            })
    }

    pub async fn list_student(&self) -> Result<Vec<Value>> {
        self.student_answers.list_all().await
    }

    /// Stores a submission under the composite `<userId>-<questionId>` id;
    /// a resubmission by the same user overwrites the earlier document.
    pub async fn submit(&self, user_id: &str, payload: SubmitAnswerPayload) -> Result<StudentAnswer> {
        let (Some(question_id), Some(question_text), Some(answer_text), Some(sub_topic), Some(topic)) = (
            payload.question_id,
            payload.question_text,
            payload.answer_text,
            payload.sub_topic,
            payload.topic,
        ) else {
            return Err(Error::BadRequest("All fields are required".to_string()));
        };

        let answer = StudentAnswer {
            id: StudentAnswer::composite_id(user_id, &question_id),
            user_id: user_id.to_string(),
            question_id,
            question_text,
            answer_text,
            sub_topic,
            topic,
        };

        self.student_answers.upsert(&answer, &answer.id).await
    }
}

use serde::{Deserialize, Serialize};

/// A student's submitted answer. The id is derived from the user and the
/// question, so resubmitting overwrites the previous document in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAnswer {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "questionText")]
    pub question_text: String,
    #[serde(rename = "answerText")]
    pub answer_text: String,
    #[serde(rename = "subTopic")]
    pub sub_topic: String,
    #[serde(rename = "Topic")]
    pub topic: String,
}

impl StudentAnswer {
    pub fn composite_id(user_id: &str, question_id: &str) -> String {
        format!("{}-{}", user_id, question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn composite_id_concatenates_user_and_question() {
        assert_eq!(
            StudentAnswer::composite_id("test-user-01", "q-7"),
            "test-user-01-q-7"
        );
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let answer = StudentAnswer {
            id: "u-q".into(),
            user_id: "u".into(),
            question_id: "q".into(),
            question_text: "What is 2+2?".into(),
            answer_text: "4".into(),
            sub_topic: "addition".into(),
            topic: "arithmetic".into(),
        };
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "u-q",
                "userId": "u",
                "questionId": "q",
                "questionText": "What is 2+2?",
                "answerText": "4",
                "subTopic": "addition",
                "Topic": "arithmetic"
            })
        );
    }

    #[test]
    fn deserializes_and_ignores_store_metadata() {
        let value = json!({
            "id": "u-q",
            "userId": "u",
            "questionId": "q",
            "questionText": "t",
            "answerText": "a",
            "subTopic": "s",
            "Topic": "T",
            "_rid": "abc",
            "_etag": "\"0000\""
        });
        let answer: StudentAnswer = serde_json::from_value(value).unwrap();
        assert_eq!(answer.topic, "T");
    }
}

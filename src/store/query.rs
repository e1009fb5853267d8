//! Parameterized query shapes for the Cosmos SQL API.
//!
//! Every endpoint is served by one of these composers; handlers never build
//! query text themselves. Field names passed to the projected variants come
//! from code constants, not request input.

use serde::Serialize;
use serde_json::{json, Value};

/// Body of a Cosmos REST query request.
#[derive(Debug, Clone, Serialize)]
pub struct SqlQuery {
    pub query: String,
    pub parameters: Vec<SqlParameter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: Value,
}

impl SqlQuery {
    fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
        }
    }

    fn param(mut self, name: &str, value: Value) -> Self {
        self.parameters.push(SqlParameter {
            name: name.to_string(),
            value,
        });
        self
    }
}

pub fn all() -> SqlQuery {
    SqlQuery::new("SELECT * FROM c")
}

pub fn by_id(id: &str) -> SqlQuery {
    SqlQuery::new("SELECT * FROM c WHERE c.id = @id").param("@id", json!(id))
}

pub fn by_field(field: &str, value: &str) -> SqlQuery {
    SqlQuery::new(format!("SELECT * FROM c WHERE c.{} = @value", field))
        .param("@value", json!(value))
}

pub fn by_id_in(ids: &[String]) -> SqlQuery {
    SqlQuery::new("SELECT * FROM c WHERE ARRAY_CONTAINS(@ids, c.id)").param("@ids", json!(ids))
}

pub fn by_id_projected(fields: &[&str], id: &str) -> SqlQuery {
    SqlQuery::new(format!(
        "SELECT {} FROM c WHERE c.id = @id",
        projection(fields)
    ))
    .param("@id", json!(id))
}

pub fn by_id_in_projected(fields: &[&str], ids: &[String]) -> SqlQuery {
    SqlQuery::new(format!(
        "SELECT {} FROM c WHERE ARRAY_CONTAINS(@ids, c.id)",
        projection(fields)
    ))
    .param("@ids", json!(ids))
}

fn projection(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("c.{}", f))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn by_id_binds_the_id_parameter() {
        let q = by_id("unit-7");
        assert_eq!(q.query, "SELECT * FROM c WHERE c.id = @id");
        assert_eq!(q.parameters.len(), 1);
        assert_eq!(q.parameters[0].name, "@id");
        assert_eq!(q.parameters[0].value, json!("unit-7"));
    }

    #[test]
    fn by_field_targets_the_named_field() {
        let q = by_field("questionId", "q-42");
        assert_eq!(q.query, "SELECT * FROM c WHERE c.questionId = @value");
        assert_eq!(q.parameters[0].value, json!("q-42"));
    }

    #[test]
    fn by_id_in_binds_the_whole_list_as_one_parameter() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let q = by_id_in(&ids);
        assert_eq!(q.query, "SELECT * FROM c WHERE ARRAY_CONTAINS(@ids, c.id)");
        assert_eq!(q.parameters[0].name, "@ids");
        assert_eq!(q.parameters[0].value, json!(["a", "b"]));
    }

    #[test]
    fn projected_variants_render_the_field_list() {
        let q = by_id_projected(&["id", "name", "chapter_ids"], "u1");
        assert_eq!(
            q.query,
            "SELECT c.id, c.name, c.chapter_ids FROM c WHERE c.id = @id"
        );

        let ids = vec!["s1".to_string()];
        let q = by_id_in_projected(&["id", "name"], &ids);
        assert_eq!(
            q.query,
            "SELECT c.id, c.name FROM c WHERE ARRAY_CONTAINS(@ids, c.id)"
        );
    }

    #[test]
    fn query_serializes_to_the_cosmos_body_shape() {
        let q = by_id("x");
        let body = serde_json::to_value(&q).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "SELECT * FROM c WHERE c.id = @id",
                "parameters": [{ "name": "@id", "value": "x" }]
            })
        );
    }
}

use std::collections::HashMap;

use futures::future::try_join_all;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::curriculum::{
    ChapterNames, Level, SubtopicName, TopicNames, UnitNameTree,
};
use crate::store::{Container, DocumentSource};

const UNIT_TREE_MISSING: &str = "Unit not found or has no chapters";

const UNIT_PROJECTION: &[&str] = &["id", "name", "chapter_ids"];
const CHAPTER_PROJECTION: &[&str] = &["id", "name", "topic_ids"];
const TOPIC_PROJECTION: &[&str] = &["id", "name", "subtopic_ids"];
// The leaf payload only needs the name, but the id is projected too so the
// resolved subtopics can be restored to the child-id order.
const SUBTOPIC_PROJECTION: &[&str] = &["id", "name"];

/// Resolves curriculum children one level at a time. The class level lives
/// in its own collection; every other level shares one, so container
/// selection is keyed on the root's level.
#[derive(Clone)]
pub struct CurriculumService {
    class_nodes: Container,
    nodes: Container,
}

impl CurriculumService {
    pub fn new(class_nodes: Container, nodes: Container) -> Self {
        Self { class_nodes, nodes }
    }

    fn root_container(&self, level: Level) -> &Container {
        match level {
            Level::Class => &self.class_nodes,
            _ => &self.nodes,
        }
    }

    pub async fn subjects_of_class(&self, class_id: &str) -> Result<Vec<Value>> {
        self.children(Level::Class, class_id, "Class not found or has no subjects")
            .await
    }

    pub async fn domains_of_subject(&self, subject_id: &str) -> Result<Vec<Value>> {
        self.children(
            Level::Subject,
            subject_id,
            "Subject not found or has no domains",
        )
        .await
    }

    pub async fn chapters_of_unit(&self, unit_id: &str) -> Result<Vec<Value>> {
        self.children(Level::Unit, unit_id, "Unit not found or has no chapter_ids")
            .await
    }

    pub async fn topics_of_chapter(&self, chapter_id: &str) -> Result<Vec<Value>> {
        self.children(
            Level::Chapter,
            chapter_id,
            "Chapter not found or has no topic_ids",
        )
        .await
    }

    pub async fn subtopics_of_topic(&self, topic_id: &str) -> Result<Vec<Value>> {
        self.children(
            Level::Topic,
            topic_id,
            "Topic not found or has no subtopic_ids",
        )
        .await
    }

    async fn children(&self, level: Level, id: &str, missing: &str) -> Result<Vec<Value>> {
        let Some(field) = level.child_field() else {
            return Err(Error::Internal(format!(
                "curriculum level {:?} has no child level",
                level
            )));
        };
        resolve_level_children(self.root_container(level), &self.nodes, field, id, missing).await
    }

    pub async fn unit_tree(&self, unit_id: &str) -> Result<Value> {
        assemble_full(&self.nodes, unit_id).await
    }

    pub async fn unit_name_tree(&self, unit_id: &str) -> Result<UnitNameTree> {
        assemble_names(&self.nodes, unit_id).await
    }
}

/// One level of fan-out: resolve the root, read its child-id list, fetch
/// the children. Only the root being absent or childless is an error.
async fn resolve_level_children<R, S>(
    root_source: &R,
    child_source: &S,
    field: &str,
    id: &str,
    missing: &str,
) -> Result<Vec<Value>>
where
    R: DocumentSource,
    S: DocumentSource,
{
    let root = root_source.find_by_id(id).await?;
    let ids = root.map(|doc| child_ids(&doc, field)).unwrap_or_default();
    if ids.is_empty() {
        return Err(Error::NotFound(missing.to_string()));
    }
    resolve_in_order(child_source, &ids).await
}

/// Materializes the unit → chapters → topics → subtopics subtree with all
/// document fields. Sibling lookups at each level run as one awaited batch;
/// levels are sequential. Children missing from the store are omitted, and
/// empty child lists below the root degrade to empty arrays.
async fn assemble_full<S: DocumentSource>(source: &S, unit_id: &str) -> Result<Value> {
    let unit = source
        .find_by_id(unit_id)
        .await?
        .ok_or_else(|| Error::NotFound(UNIT_TREE_MISSING.to_string()))?;

    let chapter_ids = child_ids(&unit, "chapter_ids");
    if chapter_ids.is_empty() {
        return Err(Error::NotFound(UNIT_TREE_MISSING.to_string()));
    }

    let chapters = resolve_in_order(source, &chapter_ids).await?;
    let chapters = try_join_all(chapters.into_iter().map(|chapter| async move {
        let topic_ids = child_ids(&chapter, "topic_ids");
        let topics = resolve_in_order(source, &topic_ids).await?;
        let topics = try_join_all(topics.into_iter().map(|topic| async move {
            let subtopic_ids = child_ids(&topic, "subtopic_ids");
            let subtopics = resolve_in_order(source, &subtopic_ids).await?;
            Ok::<_, Error>(with_children(topic, "subtopics", subtopics))
        }))
        .await?;
        Ok::<_, Error>(with_children(chapter, "topics", topics))
    }))
    .await?;

    Ok(with_children(unit, "chapters", chapters))
}

/// Same traversal as `assemble_full`, but every lookup is field-projected
/// and the result carries names only.
async fn assemble_names<S: DocumentSource>(source: &S, unit_id: &str) -> Result<UnitNameTree> {
    let unit = source
        .find_by_id_projected(unit_id, UNIT_PROJECTION)
        .await?
        .ok_or_else(|| Error::NotFound(UNIT_TREE_MISSING.to_string()))?;

    let chapter_ids = child_ids(&unit, "chapter_ids");
    if chapter_ids.is_empty() {
        return Err(Error::NotFound(UNIT_TREE_MISSING.to_string()));
    }

    let chapters =
        resolve_projected_in_order(source, &chapter_ids, CHAPTER_PROJECTION).await?;
    let chapters = try_join_all(chapters.into_iter().map(|chapter| async move {
        let topic_ids = child_ids(&chapter, "topic_ids");
        let topics = resolve_projected_in_order(source, &topic_ids, TOPIC_PROJECTION).await?;
        let topics = try_join_all(topics.into_iter().map(|topic| async move {
            let subtopic_ids = child_ids(&topic, "subtopic_ids");
            let subtopics =
                resolve_projected_in_order(source, &subtopic_ids, SUBTOPIC_PROJECTION).await?;
            Ok::<_, Error>(TopicNames {
                name: name_of(&topic),
                subtopics: subtopics
                    .iter()
                    .map(|subtopic| SubtopicName {
                        name: name_of(subtopic),
                    })
                    .collect(),
            })
        }))
        .await?;
        Ok::<_, Error>(ChapterNames {
            name: name_of(&chapter),
            topics,
        })
    }))
    .await?;

    Ok(UnitNameTree {
        name: name_of(&unit),
        chapters,
    })
}

async fn resolve_in_order<S: DocumentSource>(source: &S, ids: &[String]) -> Result<Vec<Value>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut docs = source.find_by_id_in(ids).await?;
    sort_to_id_order(&mut docs, ids);
    Ok(docs)
}

async fn resolve_projected_in_order<S: DocumentSource>(
    source: &S,
    ids: &[String],
    fields: &[&str],
) -> Result<Vec<Value>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut docs = source.find_by_id_in_projected(ids, fields).await?;
    sort_to_id_order(&mut docs, ids);
    Ok(docs)
}

fn child_ids(doc: &Value, field: &str) -> Vec<String> {
    doc.get(field)
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// The store does not return `ARRAY_CONTAINS` matches in the order of the
/// id list, so resolved children are restored to the parent's order here.
fn sort_to_id_order(docs: &mut [Value], ids: &[String]) {
    let position: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();
    docs.sort_by_key(|doc| {
        doc.get("id")
            .and_then(Value::as_str)
            .and_then(|id| position.get(id).copied())
            .unwrap_or(usize::MAX)
    });
}

fn with_children(mut doc: Value, key: &str, children: Vec<Value>) -> Value {
    if let Value::Object(map) = &mut doc {
        map.insert(key.to_string(), Value::Array(children));
    }
    doc
}

fn name_of(doc: &Value) -> String {
    doc.get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixture store. Membership lookups return matches in reverse order to
    /// prove the assembler restores the child-id order, and batch lookups
    /// are counted so tests can assert that empty id lists issue none.
    struct InMemorySource {
        docs: Vec<Value>,
        batch_lookups: AtomicUsize,
    }

    impl InMemorySource {
        fn new(docs: Vec<Value>) -> Self {
            Self {
                docs,
                batch_lookups: AtomicUsize::new(0),
            }
        }

        fn matches(&self, ids: &[String]) -> Vec<Value> {
            self.docs
                .iter()
                .filter(|doc| {
                    doc.get("id")
                        .and_then(Value::as_str)
                        .is_some_and(|id| ids.iter().any(|wanted| wanted == id))
                })
                .cloned()
                .rev()
                .collect()
        }
    }

    fn project(doc: &Value, fields: &[&str]) -> Value {
        let mut out = serde_json::Map::new();
        for field in fields {
            if let Some(value) = doc.get(*field) {
                out.insert((*field).to_string(), value.clone());
            }
        }
        Value::Object(out)
    }

    #[async_trait]
    impl DocumentSource for InMemorySource {
        async fn find_by_id(&self, id: &str) -> Result<Option<Value>> {
            Ok(self
                .docs
                .iter()
                .find(|doc| doc.get("id").and_then(Value::as_str) == Some(id))
                .cloned())
        }

        async fn find_by_id_in(&self, ids: &[String]) -> Result<Vec<Value>> {
            self.batch_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.matches(ids))
        }

        async fn find_by_id_projected(&self, id: &str, fields: &[&str]) -> Result<Option<Value>> {
            Ok(self
                .find_by_id(id)
                .await?
                .map(|doc| project(&doc, fields)))
        }

        async fn find_by_id_in_projected(
            &self,
            ids: &[String],
            fields: &[&str],
        ) -> Result<Vec<Value>> {
            self.batch_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .matches(ids)
                .iter()
                .map(|doc| project(doc, fields))
                .collect())
        }
    }

    fn unit_fixture() -> InMemorySource {
        InMemorySource::new(vec![
            json!({"id": "U1", "name": "Algebra", "chapter_ids": ["C1", "C2"]}),
            json!({"id": "C1", "name": "Linear equations", "topic_ids": ["T1"]}),
            json!({"id": "C2", "name": "Inequalities", "topic_ids": []}),
            json!({"id": "T1", "name": "Slope", "subtopic_ids": ["S1"]}),
            json!({"id": "S1", "name": "Rise over run"}),
        ])
    }

    #[tokio::test]
    async fn full_tree_nests_three_levels_and_keeps_unit_fields() {
        let source = unit_fixture();
        let tree = assemble_full(&source, "U1").await.unwrap();

        assert_eq!(tree["id"], json!("U1"));
        assert_eq!(tree["name"], json!("Algebra"));
        assert_eq!(tree["chapter_ids"], json!(["C1", "C2"]));

        let chapters = tree["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0]["id"], json!("C1"));
        assert_eq!(chapters[1]["id"], json!("C2"));

        let topics = chapters[0]["topics"].as_array().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0]["id"], json!("T1"));
        assert_eq!(topics[0]["subtopics"][0]["id"], json!("S1"));

        // Topic-less chapter degrades to an empty array, not an error.
        assert_eq!(chapters[1]["topics"], json!([]));
    }

    #[tokio::test]
    async fn empty_child_lists_issue_no_batch_lookups() {
        let source = unit_fixture();
        assemble_full(&source, "U1").await.unwrap();
        // Chapters, topics of C1, subtopics of T1. C2's empty topic list
        // and S1 (a leaf) must not produce lookups.
        assert_eq!(source.batch_lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn absent_unit_is_not_found() {
        let source = unit_fixture();
        let err = assemble_full(&source, "missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "Unit not found or has no chapters"));
    }

    #[tokio::test]
    async fn unit_without_chapters_is_not_found() {
        let source = InMemorySource::new(vec![
            json!({"id": "U-empty", "name": "Empty", "chapter_ids": []}),
            json!({"id": "U-none", "name": "No list"}),
        ]);
        for unit_id in ["U-empty", "U-none"] {
            let err = assemble_full(&source, unit_id).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn chapters_resolve_in_child_id_order() {
        // The fixture returns membership matches reversed; the tree must
        // still come back in the unit's chapter_ids order.
        let source = unit_fixture();
        let tree = assemble_full(&source, "U1").await.unwrap();
        let chapters = tree["chapters"].as_array().unwrap();
        assert_eq!(chapters[0]["id"], json!("C1"));
        assert_eq!(chapters[1]["id"], json!("C2"));
    }

    #[tokio::test]
    async fn names_tree_carries_names_only() {
        let source = unit_fixture();
        let tree = assemble_names(&source, "U1").await.unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Algebra",
                "chapters": [
                    {
                        "name": "Linear equations",
                        "topics": [
                            {
                                "name": "Slope",
                                "subtopics": [{"name": "Rise over run"}]
                            }
                        ]
                    },
                    {"name": "Inequalities", "topics": []}
                ]
            })
        );
    }

    #[tokio::test]
    async fn names_tree_requires_the_unit_root() {
        let source = InMemorySource::new(vec![json!({"id": "U2", "chapter_ids": []})]);
        assert!(assemble_names(&source, "U2").await.is_err());
        assert!(assemble_names(&source, "nope").await.is_err());
    }

    #[tokio::test]
    async fn level_children_require_root_and_child_ids() {
        let classes = InMemorySource::new(vec![
            json!({"id": "class-10", "name": "Class 10", "subject_ids": ["math", "physics"]}),
            json!({"id": "class-11", "name": "Class 11", "subject_ids": []}),
        ]);
        let nodes = InMemorySource::new(vec![
            json!({"id": "math", "name": "Mathematics"}),
            json!({"id": "physics", "name": "Physics"}),
        ]);

        let subjects = resolve_level_children(
            &classes,
            &nodes,
            "subject_ids",
            "class-10",
            "Class not found or has no subjects",
        )
        .await
        .unwrap();
        assert_eq!(subjects[0]["id"], json!("math"));
        assert_eq!(subjects[1]["id"], json!("physics"));

        for class_id in ["class-11", "class-12"] {
            let err = resolve_level_children(
                &classes,
                &nodes,
                "subject_ids",
                class_id,
                "Class not found or has no subjects",
            )
            .await
            .unwrap_err();
            assert!(
                matches!(err, Error::NotFound(msg) if msg == "Class not found or has no subjects")
            );
        }
    }
}

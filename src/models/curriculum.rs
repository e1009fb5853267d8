use serde::{Deserialize, Serialize};

/// One level of the curriculum hierarchy. Nodes at every level share the
/// shape `{ id, name, <child-id list> }`; the child-id field name and the
/// backing collection differ per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Class,
    Subject,
    Domain,
    Unit,
    Chapter,
    Topic,
    Subtopic,
}

impl Level {
    /// Field holding the ordered child-id list; leaf levels have none.
    pub fn child_field(self) -> Option<&'static str> {
        match self {
            Level::Class => Some("subject_ids"),
            Level::Subject => Some("domain_ids"),
            Level::Domain => None,
            Level::Unit => Some("chapter_ids"),
            Level::Chapter => Some("topic_ids"),
            Level::Topic => Some("subtopic_ids"),
            Level::Subtopic => None,
        }
    }
}

/// Names-only projection of a unit subtree. Ids are used to traverse and
/// to restore child order but are not part of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitNameTree {
    pub name: String,
    pub chapters: Vec<ChapterNames>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterNames {
    pub name: String,
    pub topics: Vec<TopicNames>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNames {
    pub name: String,
    pub subtopics: Vec<SubtopicName>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtopicName {
    pub name: String,
}

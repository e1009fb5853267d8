pub mod client;
pub mod query;
pub mod source;

pub use client::{Container, CosmosClient};
pub use source::DocumentSource;

/// Container names as provisioned in the Cosmos account.
pub mod collections {
    pub const MASTER_ANSWERS: &str = "masteranswer";
    pub const STUDENT_ANSWERS: &str = "studentanswer";
    pub const CLASS_CLUSTER: &str = "class_cluster";
    pub const TOPIC_CLUSTER: &str = "topic_cluster";
    pub const LEARNING_MATERIALS: &str = "learning_materials";
}

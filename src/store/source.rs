use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::store::Container;

/// Read seam used by the tree assembler so traversal logic can be exercised
/// against an in-memory source in tests.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Value>>;

    async fn find_by_id_in(&self, ids: &[String]) -> Result<Vec<Value>>;

    async fn find_by_id_projected(&self, id: &str, fields: &[&str]) -> Result<Option<Value>>;

    async fn find_by_id_in_projected(&self, ids: &[String], fields: &[&str])
        -> Result<Vec<Value>>;
}

#[async_trait]
impl DocumentSource for Container {
    async fn find_by_id(&self, id: &str) -> Result<Option<Value>> {
        Container::find_by_id(self, id).await
    }

    async fn find_by_id_in(&self, ids: &[String]) -> Result<Vec<Value>> {
        Container::find_by_id_in(self, ids).await
    }

    async fn find_by_id_projected(&self, id: &str, fields: &[&str]) -> Result<Option<Value>> {
        Container::find_by_id_projected(self, id, fields).await
    }

    async fn find_by_id_in_projected(
        &self,
        ids: &[String],
        fields: &[&str],
    ) -> Result<Vec<Value>> {
        Container::find_by_id_in_projected(self, ids, fields).await
    }
}

// In-memory document store.
// Holds repository documents in a sorted map, for tests and single-process use.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::metadata::RepositoryMetadata;

use super::DocumentStore;

/// Documents keyed by (product, id), iterated in key order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<BTreeMap<(String, String), RepositoryMetadata>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_repo(&self, product: &str, id: &str) -> Result<Option<RepositoryMetadata>> {
        let docs = self.docs.read().await;
        Ok(docs.get(&(product.to_string(), id.to_string())).cloned())
    }

    async fn list_repos(&self) -> Result<Vec<RepositoryMetadata>> {
        let docs = self.docs.read().await;
        Ok(docs.values().cloned().collect())
    }

    async fn put_repo(&self, product: &str, repo: &RepositoryMetadata) -> Result<()> {
        self.docs
            .write()
            .await
            .insert((product.to_string(), repo.id.clone()), repo.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tests::sample_metadata;

    #[tokio::test]
    async fn test_collection_group_order() {
        let store = MemoryDocumentStore::new();
        store.put_repo("web", &sample_metadata("1", "site")).await.unwrap();
        store.put_repo("core", &sample_metadata("9", "engine")).await.unwrap();

        let names: Vec<String> = store
            .list_repos()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["engine", "site"]);
    }

    #[tokio::test]
    async fn test_same_id_in_two_products() {
        let store = MemoryDocumentStore::new();
        store.put_repo("core", &sample_metadata("1", "a")).await.unwrap();
        store.put_repo("web", &sample_metadata("1", "b")).await.unwrap();

        assert_eq!(store.get_repo("core", "1").await.unwrap().unwrap().name, "a");
        assert_eq!(store.get_repo("web", "1").await.unwrap().unwrap().name, "b");
        assert_eq!(store.list_repos().await.unwrap().len(), 2);
    }
}

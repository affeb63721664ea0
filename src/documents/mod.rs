// Document database module.
// Backing store for repository metadata, organized as products/{product}/repos/{id}.

pub mod fs;
pub mod memory;
pub mod paths;

use async_trait::async_trait;

use crate::error::Result;
use crate::metadata::RepositoryMetadata;

pub use fs::{FsDocumentStore, StoredDocument};
pub use memory::MemoryDocumentStore;

/// Repository documents grouped by product.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read `products/{product}/repos/{id}`. `None` if the document does not exist.
    async fn get_repo(&self, product: &str, id: &str) -> Result<Option<RepositoryMetadata>>;

    /// Read every document of every `repos` collection, ordered by the
    /// `(product, id)` pair compared as strings.
    async fn list_repos(&self) -> Result<Vec<RepositoryMetadata>>;

    /// Write `products/{product}/repos/{repo.id}`, replacing any existing document.
    async fn put_repo(&self, product: &str, repo: &RepositoryMetadata) -> Result<()>;
}

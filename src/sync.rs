// Document sync.
// Reads tracked repositories through the GitHub facade and writes their metadata documents.

use tracing::{error, info};

use crate::config::ProductConfig;
use crate::documents::DocumentStore;
use crate::error::{MetaError, Result};
use crate::github::{self, GitHubApi};
use crate::metadata::RepositoryMetadata;

/// A repository that could not be synced.
#[derive(Debug)]
pub struct SyncFailure {
    pub product: String,
    pub repo: String,
    pub error: MetaError,
}

/// Outcome of one sync pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sync every repository of every product. A failing repository is
/// recorded and skipped; the pass never stops early.
pub async fn sync_products(
    api: &dyn GitHubApi,
    documents: &dyn DocumentStore,
    products: &[ProductConfig],
) -> SyncReport {
    let mut report = SyncReport::default();

    for product in products {
        for full_name in &product.repos {
            match sync_repo(api, documents, &product.name, full_name).await {
                Ok(meta) => {
                    info!(product = %product.name, repo = %full_name, id = %meta.id, "Synced repo");
                    report.synced += 1;
                }
                Err(e) => {
                    error!(product = %product.name, repo = %full_name, error = %e, "Sync failed");
                    report.failures.push(SyncFailure {
                        product: product.name.clone(),
                        repo: full_name.clone(),
                        error: e,
                    });
                }
            }
        }
    }

    report
}

/// Fetch one `owner/name` repository and store its document under `product`.
pub async fn sync_repo(
    api: &dyn GitHubApi,
    documents: &dyn DocumentStore,
    product: &str,
    full_name: &str,
) -> Result<RepositoryMetadata> {
    let (owner, name) = split_full_name(full_name)?;

    let repo = github::get_repo(api, owner, name).await?;
    let license = github::get_repo_license(api, owner, name).await;
    let meta = RepositoryMetadata::from_github(&repo, &license);

    documents.put_repo(product, &meta).await?;
    Ok(meta)
}

fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(MetaError::Other(format!(
            "Invalid repository \"{}\", expected owner/name",
            full_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::MemoryDocumentStore;
    use crate::github::facade::tests::FakeApi;

    fn product(name: &str, repos: &[&str]) -> ProductConfig {
        ProductConfig {
            name: name.to_string(),
            repos: repos.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(split_full_name("octo/hello").unwrap(), ("octo", "hello"));
        assert!(split_full_name("octo").is_err());
        assert!(split_full_name("/hello").is_err());
        assert!(split_full_name("a/b/c").is_err());
    }

    #[tokio::test]
    async fn test_sync_writes_documents() {
        let api = FakeApi::default()
            .with_repo("octo", "engine", 42)
            .with_license("octo", "engine", "mit", "MIT License")
            .with_repo("octo", "site", 100);
        let documents = MemoryDocumentStore::new();

        let report = sync_products(
            &api,
            &documents,
            &[product("core", &["octo/engine"]), product("web", &["octo/site"])],
        )
        .await;

        assert!(report.is_clean());
        assert_eq!(report.synced, 2);

        let engine = documents.get_repo("core", "42").await.unwrap().unwrap();
        assert_eq!(engine.license_key.as_deref(), Some("mit"));

        let site = documents.get_repo("web", "100").await.unwrap().unwrap();
        assert_eq!(site.license_key, None);
    }

    #[tokio::test]
    async fn test_sync_continues_past_failures() {
        let api = FakeApi::default().with_repo("octo", "engine", 42);
        let documents = MemoryDocumentStore::new();

        let report = sync_products(
            &api,
            &documents,
            &[product("core", &["octo/missing", "bogus", "octo/engine"])],
        )
        .await;

        assert_eq!(report.synced, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].repo, "octo/missing");
        assert!(matches!(report.failures[0].error.root(), MetaError::NotFound(_)));
        assert!(documents.get_repo("core", "42").await.unwrap().is_some());
    }
}

// Repository metadata cache.
// Holds repos by product and id plus the flat project list, filled from the document store.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::documents::DocumentStore;
use crate::error::Result;
use crate::metadata::RepositoryMetadata;

/// In-memory cache of repository metadata.
///
/// Two views are kept: `repos` (product → id → record), filled by
/// [`fetch_repo`](Self::fetch_repo) and [`add_repos`](Self::add_repos), and
/// the flat `github_projects` list, filled by
/// [`fetch_projects`](Self::fetch_projects). The views are not reconciled.
/// Entries never expire.
#[derive(Debug)]
pub struct ProjectStore<D> {
    documents: D,
    repos: HashMap<String, HashMap<String, RepositoryMetadata>>,
    github_projects: Vec<RepositoryMetadata>,
}

impl<D: DocumentStore> ProjectStore<D> {
    pub fn new(documents: D) -> Self {
        Self {
            documents,
            repos: HashMap::new(),
            github_projects: Vec::new(),
        }
    }

    /// The backing document store.
    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// Load one repository document and cache it under (product, id).
    ///
    /// A missing document leaves the cache untouched and returns `None`.
    pub async fn fetch_repo(
        &mut self,
        product: &str,
        id: &str,
    ) -> Result<Option<&RepositoryMetadata>> {
        debug!(product, id, "fetchRepo");

        let Some(repo) = self.documents.get_repo(product, id).await? else {
            warn!(product, id, "No repo document found");
            return Ok(None);
        };

        self.add_repos(product, [repo]);
        Ok(self.repo_by_product_and_id(product, id))
    }

    /// Load every repository document of every product into the flat list.
    pub async fn fetch_projects(&mut self) -> Result<&[RepositoryMetadata]> {
        let projects = self.documents.list_repos().await?;
        info!(count = projects.len(), "Fetched projects");

        self.set_github_projects(projects);
        Ok(self.github_projects())
    }

    /// Merge records into a product's map, keyed by their id.
    /// Records for ids already present replace the old ones.
    pub fn add_repos(&mut self, product: &str, repos: impl IntoIterator<Item = RepositoryMetadata>) {
        let by_id = self.repos.entry(product.to_string()).or_default();
        for repo in repos {
            by_id.insert(repo.id.clone(), repo);
        }
    }

    /// Replace the flat project list.
    pub fn set_github_projects(&mut self, projects: Vec<RepositoryMetadata>) {
        self.github_projects = projects;
    }

    /// Cached record for (product, id), if any. Never fetches.
    pub fn repo_by_product_and_id(&self, product: &str, id: &str) -> Option<&RepositoryMetadata> {
        self.repos.get(product)?.get(id)
    }

    pub fn github_projects(&self) -> &[RepositoryMetadata] {
        &self.github_projects
    }

    /// Products with at least one cached map, sorted.
    pub fn products(&self) -> Vec<&str> {
        let mut products: Vec<&str> = self.repos.keys().map(String::as_str).collect();
        products.sort_unstable();
        products
    }
}

// Repository metadata record.
// The shape shared by the document store, the cache store and the sync pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{RepoLicense, Repository};

/// Tracked attributes of one GitHub repository.
///
/// Records are replaced wholesale on refetch, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// GitHub-assigned repository id.
    pub id: String,
    pub owner: String,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub license_key: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl RepositoryMetadata {
    /// Build a record from a repository response and its license.
    /// The license endpoint's key wins over the summary on the repository.
    pub fn from_github(repo: &Repository, license: &RepoLicense) -> Self {
        let license_key = license
            .key
            .clone()
            .or_else(|| repo.license.as_ref().map(|l| l.key.clone()));

        Self {
            id: repo.id.to_string(),
            owner: repo.owner.login.clone(),
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: repo.description.clone(),
            default_branch: repo.default_branch.clone(),
            license_key,
            html_url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            archived: repo.archived,
            topics: repo.topics.clone(),
            pushed_at: repo.pushed_at,
            updated_at: repo.updated_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::LicenseInfo;
    use crate::github::facade::tests::sample_repo;

    pub(crate) fn sample_metadata(id: &str, name: &str) -> RepositoryMetadata {
        RepositoryMetadata {
            id: id.to_string(),
            owner: "octo".to_string(),
            name: name.to_string(),
            full_name: format!("octo/{}", name),
            description: None,
            default_branch: "main".to_string(),
            license_key: Some("apache-2.0".to_string()),
            html_url: format!("https://github.com/octo/{}", name),
            stars: 0,
            forks: 0,
            open_issues: 0,
            archived: false,
            topics: Vec::new(),
            pushed_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_github() {
        let repo = sample_repo("octo", "hello", 42);
        let license = RepoLicense {
            key: Some("mit".to_string()),
            content: "MIT".to_string(),
        };

        let meta = RepositoryMetadata::from_github(&repo, &license);
        assert_eq!(meta.id, "42");
        assert_eq!(meta.owner, "octo");
        assert_eq!(meta.full_name, "octo/hello");
        assert_eq!(meta.license_key.as_deref(), Some("mit"));
        assert_eq!(meta.stars, 10);
    }

    #[test]
    fn test_license_key_falls_back_to_repo_summary() {
        let mut repo = sample_repo("octo", "hello", 42);
        repo.license = Some(LicenseInfo {
            key: "bsd-3-clause".to_string(),
            name: "BSD 3-Clause".to_string(),
            spdx_id: Some("BSD-3-Clause".to_string()),
        });

        let meta = RepositoryMetadata::from_github(&repo, &RepoLicense::default());
        assert_eq!(meta.license_key.as_deref(), Some("bsd-3-clause"));
    }

    #[test]
    fn test_minimal_document_parses() {
        let json = r#"{
            "id": "42", "owner": "octo", "name": "hello", "full_name": "octo/hello",
            "default_branch": "main", "html_url": "https://github.com/octo/hello",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let meta: RepositoryMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, "42");
        assert!(meta.topics.is_empty());
        assert!(meta.license_key.is_none());
    }
}

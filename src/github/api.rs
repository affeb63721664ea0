// Seam between the facade and the HTTP client.
// Lets facade logic run against any source of GitHub responses.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{ContentsResponse, LicenseContent, Repository};

/// Raw GitHub REST calls used by the facade.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}`
    async fn repository(&self, owner: &str, repo: &str) -> Result<Repository>;

    /// `GET /repos/{owner}/{repo}/license`
    async fn license(&self, owner: &str, repo: &str) -> Result<LicenseContent>;

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={git_ref}`
    async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<ContentsResponse>;
}

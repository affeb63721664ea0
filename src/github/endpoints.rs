// GitHub API endpoint functions.
// Implements the raw repository, license and contents calls on top of the HTTP client.

use async_trait::async_trait;

use crate::error::Result;

use super::api::GitHubApi;
use super::client::GitHubClient;
use super::types::{ContentsResponse, LicenseContent, Repository};

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let url = self.url(["repos", owner, repo])?;
        let response = self.get(url, &[]).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }

    async fn license(&self, owner: &str, repo: &str) -> Result<LicenseContent> {
        let url = self.url(["repos", owner, repo, "license"])?;
        let response = self.get(url, &[]).await?;
        let license: LicenseContent = response.json().await?;
        Ok(license)
    }

    async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<ContentsResponse> {
        let segments = ["repos", owner, repo, "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = self.url(segments)?;
        let response = self.get(url, &[("ref", git_ref)]).await?;
        let contents: ContentsResponse = response.json().await?;
        Ok(contents)
    }
}

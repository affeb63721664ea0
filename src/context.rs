// Process context.
// Built once at startup; owns the configuration and the shared GitHub client.

use crate::config::Config;
use crate::documents::FsDocumentStore;
use crate::error::Result;
use crate::github::GitHubClient;

#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub github: GitHubClient,
}

impl Context {
    /// Authenticate the GitHub client with the configured token.
    pub fn new(config: Config) -> Result<Self> {
        let token = config.github_token()?;
        let github = GitHubClient::with_base_url(&token, &config.github.api_url)?;
        Ok(Self { config, github })
    }

    /// Document store at the configured root.
    pub fn documents(&self) -> FsDocumentStore {
        FsDocumentStore::new(self.config.store_root())
    }
}

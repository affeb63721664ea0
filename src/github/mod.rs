// GitHub API module.
// Provides the client, response types, and the metadata facade used to populate documents.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod facade;
pub mod types;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use facade::{
    RepoLicense, get_default_branch, get_directory_content, get_file_content, get_repo,
    get_repo_license,
};
pub use types::*;

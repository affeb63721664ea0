// Repository metadata facade over the GitHub API.
// Wraps raw calls with context, decodes content payloads, and checks contents response shapes.

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::{debug, warn};

use crate::error::{MetaError, Result};

use super::api::GitHubApi;
use super::types::{ContentKind, ContentsResponse, Repository};

/// License key and decoded license text of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoLicense {
    pub key: Option<String>,
    pub content: String,
}

/// Get full repository metadata.
pub async fn get_repo(api: &dyn GitHubApi, owner: &str, repo: &str) -> Result<Repository> {
    api.repository(owner, repo)
        .await
        .map_err(|e| e.context(format!("Unable to get repo {}/{}", owner, repo)))
}

/// Get the license of a repository.
///
/// Best effort: any failure, including a repository without a license file,
/// is logged and returned as an empty license.
pub async fn get_repo_license(api: &dyn GitHubApi, owner: &str, repo: &str) -> RepoLicense {
    match fetch_license(api, owner, repo).await {
        Ok(license) => license,
        Err(e) => {
            warn!(owner, repo, error = %e, "Failed to get license");
            RepoLicense::default()
        }
    }
}

async fn fetch_license(api: &dyn GitHubApi, owner: &str, repo: &str) -> Result<RepoLicense> {
    let res = api.license(owner, repo).await?;
    let content = decode_content(&res.content, &res.encoding)?;

    Ok(RepoLicense {
        key: res.license.map(|l| l.key),
        content,
    })
}

/// Get the name of the default branch.
pub async fn get_default_branch(api: &dyn GitHubApi, owner: &str, repo: &str) -> Result<String> {
    let res = api
        .repository(owner, repo)
        .await
        .map_err(|e| e.context(format!("Unable to get default branch of {}/{}", owner, repo)))?;

    Ok(res.default_branch)
}

/// Get the decoded text of a single file at `path` on `branch`.
pub async fn get_file_content(
    api: &dyn GitHubApi,
    owner: &str,
    repo: &str,
    branch: &str,
    path: &str,
) -> Result<String> {
    let res = api.contents(owner, repo, path, branch).await.map_err(|e| {
        e.context(format!(
            "Unable to fetch file \"{}@{}\" from \"{}/{}\"",
            path, branch, owner, repo
        ))
    })?;

    let entry = match res {
        ContentsResponse::Directory(entries) => {
            return Err(MetaError::IsDirectory {
                path: path.to_string(),
                entries: entries.len(),
            });
        }
        ContentsResponse::Entry(entry) => entry,
    };

    if entry.kind != ContentKind::File {
        return Err(MetaError::NotAFile {
            path: entry.path,
            kind: entry.kind.as_str().to_string(),
        });
    }

    let content = entry
        .content
        .ok_or_else(|| MetaError::MissingContent(entry.path.clone()))?;
    let encoding = entry.encoding.unwrap_or_default();

    debug!(owner, repo, branch, path, size = entry.size, "Fetched file");
    decode_content(&content, &encoding)
}

/// List the paths of the children of a directory, in API order.
pub async fn get_directory_content(
    api: &dyn GitHubApi,
    owner: &str,
    repo: &str,
    branch: &str,
    path: &str,
) -> Result<Vec<String>> {
    let res = api.contents(owner, repo, path, branch).await.map_err(|e| {
        e.context(format!(
            "Unable to list directory \"{}@{}\" from \"{}/{}\"",
            path, branch, owner, repo
        ))
    })?;

    match res {
        ContentsResponse::Directory(entries) => Ok(entries.into_iter().map(|e| e.path).collect()),
        ContentsResponse::Entry(entry) => Err(MetaError::NotADirectory {
            path: entry.path,
            kind: entry.kind.as_str().to_string(),
        }),
    }
}

/// Decode a content payload using the encoding declared by the API.
/// GitHub wraps base64 at 60 columns, so whitespace is dropped first.
pub fn decode_content(content: &str, encoding: &str) -> Result<String> {
    match encoding {
        "base64" => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD.decode(compact)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        "" | "utf-8" | "utf8" => Ok(content.to_string()),
        other => Err(MetaError::UnsupportedEncoding(other.to_string())),
    }
}

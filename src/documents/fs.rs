// Filesystem document store.
// Keeps one JSON document per repository under products/{product}/repos/{id}.json.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;
use crate::metadata::RepositoryMetadata;

use super::DocumentStore;
use super::paths;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// On-disk wrapper around a stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument<T> {
    /// The stored record.
    pub data: T,
    /// When the record was written.
    pub written_at: DateTime<Utc>,
}

impl<T> StoredDocument<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            written_at: Utc::now(),
        }
    }
}

/// Document store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn get_repo(&self, product: &str, id: &str) -> Result<Option<RepositoryMetadata>> {
        let path = paths::repo_path(&self.root, product, id);
        let doc: Option<StoredDocument<RepositoryMetadata>> = read_document(&path).await?;
        Ok(doc.map(|d| d.data))
    }

    async fn list_repos(&self) -> Result<Vec<RepositoryMetadata>> {
        let mut keyed = Vec::new();

        for (product, product_dir) in named_entries(&paths::products_dir(&self.root), None).await? {
            let repos_dir = product_dir.join("repos");
            for (id, path) in named_entries(&repos_dir, Some(paths::DOCUMENT_EXT)).await? {
                if let Some(doc) = read_document::<RepositoryMetadata>(&path).await? {
                    keyed.push(((product.clone(), id), doc.data));
                }
            }
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, repo)| repo).collect())
    }

    async fn put_repo(&self, product: &str, repo: &RepositoryMetadata) -> Result<()> {
        let path = paths::repo_path(&self.root, product, &repo.id);
        write_document(&path, &StoredDocument::new(repo)).await?;
        debug!(product, id = %repo.id, path = %path.display(), "Wrote repo document");
        Ok(())
    }
}

/// Read a JSON document, returning None if it does not exist.
async fn read_document<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<StoredDocument<T>>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let doc: StoredDocument<T> = serde_json::from_str(&contents)?;
    Ok(Some(doc))
}

/// Write a JSON document atomically via a temp file.
/// Temp names are unique per write, so concurrent writers of one key never share one.
async fn write_document<T: Serialize>(path: &Path, doc: &StoredDocument<T>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(doc)?;

    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_path = path.with_extension(format!("{}.{}.tmp", std::process::id(), seq));
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(json.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    Ok(())
}

/// Decoded names of the entries of `dir`, with their paths. With `ext`, only
/// files carrying that extension are kept and the extension is stripped.
/// Entries this store did not write are skipped. A missing directory has none.
async fn named_entries(dir: &Path, ext: Option<&str>) -> Result<Vec<(String, PathBuf)>> {
    let mut reader = match fs::read_dir(dir).await {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let component = match ext {
            Some(ext) => match file_name
                .strip_suffix(ext)
                .and_then(|rest| rest.strip_suffix('.'))
            {
                Some(stem) => stem,
                None => continue,
            },
            None => file_name,
        };

        match paths::decode_name(component) {
            Some(name) => entries.push((name, path.clone())),
            None => debug!(path = %path.display(), "Skipping foreign entry"),
        }
    }
    Ok(entries)
}

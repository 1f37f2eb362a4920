//! JSON file store.
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! document, so a reader sees either the old or the new collection.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::PostStore;
use crate::errors::AppError;
use crate::models::Post;

/// Post store backed by a single JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the document at `path`, creating it as an empty array if it does not exist.
    ///
    /// Fails when the location cannot be created or read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if !tokio::fs::try_exists(&path).await? {
            tracing::info!("Creating empty post document at {:?}", path);
            write_document(&path, &[]).await?;
        }

        // Surface permission problems at startup instead of on the first request.
        let bytes = tokio::fs::read(&path).await?;
        let posts = decode_document(&bytes, &path);
        tracing::info!("Post document {:?} holds {} posts", path, posts.len());

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PostStore for JsonFileStore {
    async fn load(&self) -> Vec<Post> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => decode_document(&bytes, &self.path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Post document {:?} missing, treating as empty", self.path);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read post document {:?}, treating as empty: {}",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), AppError> {
        write_document(&self.path, posts).await
    }
}

/// Parse the document, recovering to an empty collection when it is blank or corrupt.
///
/// Entries of a well-formed array that are not valid posts are skipped, so
/// one bad entry does not discard the rest.
fn decode_document(bytes: &[u8], path: &Path) -> Vec<Post> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }

    let entries: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                "Post document {:?} is malformed, treating as empty: {}",
                path,
                e
            );
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(
                    "Skipping invalid entry {} in post document {:?}: {}",
                    index,
                    path,
                    e
                );
                None
            }
        })
        .collect()
}

async fn write_document(path: &Path, posts: &[Post]) -> Result<(), AppError> {
    let bytes = serde_json::to_vec_pretty(posts)
        .map_err(|e| AppError::Internal(format!("Failed to serialize posts: {}", e)))?;

    let tmp = temp_path(path);
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(e.into());
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

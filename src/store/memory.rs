//! In-memory post store for tests and ephemeral use.

use std::sync::RwLock;

use async_trait::async_trait;

use super::PostStore;
use crate::errors::AppError;
use crate::models::Post;

/// A [`PostStore`] holding the collection in a `RwLock`. Data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `posts`.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn load(&self) -> Vec<Post> {
        match self.posts.read() {
            Ok(posts) => posts.clone(),
            Err(poisoned) => {
                tracing::warn!("Memory store lock poisoned, reading last written state");
                poisoned.into_inner().clone()
            }
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), AppError> {
        let mut stored = self
            .posts
            .write()
            .map_err(|e| AppError::Internal(format!("lock poisoned: {e}")))?;
        *stored = posts.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        assert!(MemoryStore::new().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let seeded = Post {
            id: 1,
            title: "Seed".to_string(),
            content: "c".to_string(),
            date: "2024-01-01 00:00".to_string(),
        };
        let store = MemoryStore::with_posts(vec![seeded.clone()]);
        assert_eq!(store.load().await, vec![seeded]);

        store.save(&[]).await.unwrap();

        assert!(store.load().await.is_empty());
    }
}

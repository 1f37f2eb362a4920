//! Post service: the create, update and delete rules.
//!
//! Each mutation loads the full collection, changes it and saves it back
//! while holding a single writer lock, so concurrent requests cannot
//! overwrite each other's changes.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{next_id, now_date, Post, PostDraft};
use crate::store::PostStore;

/// Business operations on the post collection.
pub struct PostService {
    store: Arc<dyn PostStore>,
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All posts in stored order.
    pub async fn list(&self) -> Vec<Post> {
        self.store.load().await
    }

    /// Create a post, or update the one whose id the draft names.
    ///
    /// An id that matches no post falls back to creating a new post with a
    /// freshly assigned id. Title and content are stored verbatim.
    pub async fn upsert(&self, draft: PostDraft) -> Result<Post, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;
        let date = now_date();

        let (target, title, content) = match draft {
            PostDraft::Create { title, content } => (None, title, content),
            PostDraft::UpdateOrCreate { id, title, content } => (Some(id), title, content),
        };

        let post = match target.and_then(|id| posts.iter_mut().find(|p| p.id == id)) {
            Some(existing) => {
                existing.title = title;
                existing.content = content;
                existing.date = date;
                tracing::info!("Updated post {}", existing.id);
                existing.clone()
            }
            None => {
                let id = next_id(&posts).ok_or_else(|| {
                    AppError::Internal("No post id left after i64::MAX".to_string())
                })?;
                let post = Post {
                    id,
                    title,
                    content,
                    date,
                };
                match target {
                    Some(requested) => tracing::info!(
                        "Post {} not found, created post {} instead",
                        requested,
                        post.id
                    ),
                    None => tracing::info!("Created post {}", post.id),
                }
                posts.push(post.clone());
                post
            }
        };

        self.store.save(&posts).await?;
        Ok(post)
    }

    /// Remove every post with `id`. Returns how many were removed; zero is not an error.
    pub async fn delete(&self, id: i64) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        let removed = before - posts.len();

        self.store.save(&posts).await?;

        if removed == 0 {
            tracing::debug!("Delete of post {} matched nothing", id);
        } else {
            tracing::info!("Deleted post {}", id);
        }
        Ok(removed)
    }
}

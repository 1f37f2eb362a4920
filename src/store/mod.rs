//! Post storage.
//!
//! The whole post collection is one document: every read loads all of it
//! and every write replaces all of it. Nothing is cached between calls.

mod file;
#[cfg(test)]
mod memory;

pub use file::*;
#[cfg(test)]
pub use memory::*;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::Post;

/// Storage backend for the full post collection.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Load every stored post in persisted order.
    ///
    /// Never fails: a missing, empty or unreadable document yields an empty list.
    async fn load(&self) -> Vec<Post>;

    /// Replace the stored collection with `posts`.
    async fn save(&self, posts: &[Post]) -> Result<(), AppError>;
}

//! Data models for the blog.
//!
//! The JSON shapes here are shared by the storage document and the HTTP API.

mod post;

pub use post::*;

//! HTTP API module.
//!
//! Four endpoints plus the page; every failure is a bare status code.

mod page;
mod posts;

pub use page::*;
pub use posts::*;

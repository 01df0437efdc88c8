//! Cache-and-invalidate layer for server responses
//!
//! Reads go through [`QueryClient::fetch`], which serves a cached response
//! until its key is invalidated. Writes go through [`QueryClient::mutate`],
//! which invalidates a fixed list of keys once the server accepts the change.

mod cache;
mod key;

pub use cache::{QueryClient, QueryResult, QueryStatus};
pub use key::QueryKey;

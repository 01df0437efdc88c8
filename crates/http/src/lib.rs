//! Jiu-Pluck HTTP client
//!
//! One typed function per backend endpoint, grouped by resource. Every call
//! goes through [`client::ApiClient`], which owns the base address and the
//! bearer header.

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, error::ClientError};

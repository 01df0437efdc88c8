//! Jiu-Pluck core types and utilities

pub mod config;
pub mod error;

pub use self::config::{ApiConfig, ClientConfig};
pub use error::{CoreError, CoreResult, ErrorContext};

//! Session, route guard and cached data fetching shared by Jiu-Pluck front ends

pub mod auth;
pub mod client;
pub mod config;
pub mod hooks;
pub mod query;

pub use auth::{GuardDecision, Route, RouteGuard, Session, TokenPair, TokenStorage};
pub use client::AppContext;
pub use config::{AdminConfig, AuthConfig};
pub use query::{QueryClient, QueryKey, QueryResult, QueryStatus};

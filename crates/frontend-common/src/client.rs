//! Application context: API client, session and query cache wired together

use crate::auth::{RouteGuard, Session, TokenStorage};
use crate::query::QueryClient;
use jiupluck_core::ClientConfig;
pub use jiupluck_http::ClientError;
use jiupluck_http::ApiClient;
use std::sync::Arc;
use std::time::Duration;

/// Everything a view needs to talk to the backend
///
/// Constructed once at startup and cloned into whatever needs it; clones
/// share the connection pool, the session and the cache.
#[derive(Clone, Debug)]
pub struct AppContext {
    base: ApiClient,
    session: Session,
    queries: QueryClient,
}

impl AppContext {
    pub fn new(base: ApiClient, session: Session) -> Self {
        Self {
            base,
            session,
            queries: QueryClient::new(),
        }
    }

    /// Build the client from configuration and resume any persisted session
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is unusable
    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, ClientError> {
        let mut builder = ApiClient::builder()
            .base_url(config.api.base_url.as_str())
            .user_agent(config.api.user_agent.as_str());
        if config.api.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.api.timeout_secs));
        }

        let base = builder.build()?;

        Ok(Self::new(base, Session::restore(storage)))
    }

    /// Client carrying the session's access token as of this call
    pub fn api(&self) -> ApiClient {
        self.base.with_access_token(self.session.access_token())
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone())
    }
}

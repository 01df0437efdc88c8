//! Per-key response cache with prefix invalidation

use super::QueryKey;
use jiupluck_http::ClientError;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

type Payload = Arc<dyn Any + Send + Sync>;

/// Lifecycle of one cached query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    /// A request for this key is in flight
    Loading,
    Success,
    Error,
}

#[derive(Default)]
struct QueryEntry {
    status: Option<QueryStatus>,
    data: Option<Payload>,
    error: Option<Arc<ClientError>>,
    stale: bool,
    /// Bumped on every invalidation so in-flight fetches can tell
    generation: u64,
}

impl QueryEntry {
    fn data<T: Clone + 'static>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|data| data.downcast_ref::<T>())
            .cloned()
    }
}

/// Finished read: the fetched (or cached) value, or the failure
#[derive(Clone, Debug)]
pub struct QueryResult<T> {
    result: Result<T, Arc<ClientError>>,
    previous: Option<T>,
    from_cache: bool,
}

impl<T> QueryResult<T> {
    pub const fn status(&self) -> QueryStatus {
        match self.result {
            Ok(_) => QueryStatus::Success,
            Err(_) => QueryStatus::Error,
        }
    }

    /// Fresh data, or on failure the last data this key held
    pub fn data(&self) -> Option<&T> {
        match &self.result {
            Ok(data) => Some(data),
            Err(_) => self.previous.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.result.as_ref().err().map(AsRef::as_ref)
    }

    /// Served without a request
    pub const fn from_cache(&self) -> bool {
        self.from_cache
    }

    /// Drop the previous data and keep only the outcome
    ///
    /// # Errors
    ///
    /// Returns the request failure
    pub fn into_result(self) -> Result<T, Arc<ClientError>> {
        self.result
    }
}

/// Shared response cache keyed by [`QueryKey`]
///
/// Each key tracks its own status independently. When two requests for the
/// same key overlap, the one that finishes last wins.
#[derive(Clone, Default)]
pub struct QueryClient {
    entries: Arc<Mutex<HashMap<QueryKey, QueryEntry>>>,
    /// Bumped by [`QueryClient::clear`]; only changed while `entries` is locked
    epoch: Arc<AtomicU64>,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.lock().len())
            .finish()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, QueryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `key` from cache, or run `fetcher` when absent, stale or failed
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let (epoch, generation, previous) = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_default();

            if entry.status == Some(QueryStatus::Success) && !entry.stale {
                if let Some(data) = entry.data::<T>() {
                    debug!(key = %key, "query served from cache");
                    return QueryResult {
                        result: Ok(data),
                        previous: None,
                        from_cache: true,
                    };
                }
            }

            entry.status = Some(QueryStatus::Loading);
            (self.epoch.load(Ordering::SeqCst), entry.generation, entry.data::<T>())
        };

        debug!(key = %key, "query fetching");
        let outcome = fetcher().await;

        let mut entries = self.lock();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            // Cache was cleared while in flight: hand the outcome back, store nothing
            debug!(key = %key, "query outcome dropped after cache clear");
            return match outcome {
                Ok(data) => QueryResult {
                    result: Ok(data),
                    previous: None,
                    from_cache: false,
                },
                Err(err) => QueryResult {
                    result: Err(Arc::new(err)),
                    previous: None,
                    from_cache: false,
                },
            };
        }
        let entry = entries.entry(key.clone()).or_default();
        match outcome {
            Ok(data) => {
                entry.status = Some(QueryStatus::Success);
                entry.data = Some(Arc::new(data.clone()));
                entry.error = None;
                // Invalidated while in flight: keep the data but refetch next time
                entry.stale = entry.generation != generation;
                QueryResult {
                    result: Ok(data),
                    previous: None,
                    from_cache: false,
                }
            }
            Err(err) => {
                warn!(key = %key, "query failed: {err}");
                let err = Arc::new(err);
                entry.status = Some(QueryStatus::Error);
                entry.error = Some(err.clone());
                QueryResult {
                    result: Err(err),
                    previous,
                    from_cache: false,
                }
            }
        }
    }

    /// Run a write; on success only, invalidate exactly `invalidates`
    ///
    /// # Errors
    ///
    /// Returns the mutation's own error unchanged; nothing is invalidated then
    pub async fn mutate<T, Fut>(&self, mutation: Fut, invalidates: &[QueryKey]) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let value = mutation.await?;
        for key in invalidates {
            self.invalidate(key);
        }
        Ok(value)
    }

    /// Mark every entry under `prefix` stale; returns how many matched
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let mut matched = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                entry.generation += 1;
                matched += 1;
            }
        }
        debug!(prefix = %prefix, matched, "queries invalidated");
        matched
    }

    /// Whether `key` is cached but must be refetched
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock().get(key).is_some_and(|entry| entry.stale)
    }

    pub fn status(&self, key: &QueryKey) -> Option<QueryStatus> {
        self.lock().get(key).and_then(|entry| entry.status)
    }

    /// Last data held for `key`, fresh or not
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.lock().get(key).and_then(QueryEntry::data)
    }

    /// Last error recorded for `key`
    pub fn last_error(&self, key: &QueryKey) -> Option<Arc<ClientError>> {
        self.lock().get(key).and_then(|entry| entry.error.clone())
    }

    /// Seed `key` with data as if it had just been fetched
    pub fn set<T: Send + Sync + 'static>(&self, key: QueryKey, data: T) {
        let mut entries = self.lock();
        let entry = entries.entry(key).or_default();
        entry.status = Some(QueryStatus::Success);
        entry.data = Some(Arc::new(data));
        entry.error = None;
        entry.stale = false;
    }

    /// Forget everything, e.g. after logout
    ///
    /// Fetches still in flight complete for their caller but are not cached.
    pub fn clear(&self) {
        let mut entries = self.lock();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        entries.clear();
        debug!("query cache cleared");
    }
}

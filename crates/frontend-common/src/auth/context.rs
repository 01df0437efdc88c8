//! Session: the single writer of the authentication tokens
//!
//! A [`Session`] is constructed explicitly and handed to whatever needs it
//! (HTTP wrapper, route guard, views). Readers only observe; every change
//! goes through [`Session::dispatch`], which updates memory first and then
//! mirrors the result into durable storage.

use super::storage::{SessionError, TokenStorage};
use jiupluck_http::types::TokenResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{info, warn};

/// Access token plus the refresh token used to mint a new one
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.refresh_token)
    }
}

// Tokens never end up in logs
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Authentication state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub tokens: Option<TokenPair>,
}

impl AuthState {
    /// Presence of an access token is the only authentication signal
    pub const fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    /// Apply an action, producing the next state
    #[must_use]
    pub fn reduce(self, action: AuthAction) -> Self {
        match action {
            AuthAction::Login(tokens) | AuthAction::Refresh(tokens) => Self {
                tokens: Some(tokens),
            },
            AuthAction::Logout => Self { tokens: None },
        }
    }
}

/// Authentication state transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Successful login: store the new pair
    Login(TokenPair),
    /// Refresh exchange: replace the pair
    Refresh(TokenPair),
    /// Logout or explicit invalidation: wipe both tokens
    Logout,
}

/// Shared handle to the current authentication state
#[derive(Clone)]
pub struct Session {
    state: Arc<watch::Sender<AuthState>>,
    storage: Arc<dyn TokenStorage>,
    /// Held across the memory update and the storage write
    writer: Arc<Mutex<()>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start with no tokens, persisting future changes to `storage`
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self::with_state(storage, AuthState::default())
    }

    /// Resume whatever pair `storage` holds from an earlier run
    ///
    /// Unreadable persisted state is logged and treated as logged out.
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let tokens = match storage.load() {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!("Ignoring persisted tokens: {err}");
                None
            }
        };

        if tokens.is_some() {
            info!("Restored persisted session");
        }

        Self::with_state(storage, AuthState { tokens })
    }

    fn with_state(storage: Arc<dyn TokenStorage>, state: AuthState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            state: Arc::new(sender),
            storage,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Apply an action to memory, then mirror it to storage
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails; the in-memory state has
    /// already changed at that point.
    pub fn dispatch(&self, action: AuthAction) -> Result<(), SessionError> {
        let persist = match &action {
            AuthAction::Login(tokens) | AuthAction::Refresh(tokens) => Some(tokens.clone()),
            AuthAction::Logout => None,
        };

        match &action {
            AuthAction::Login(_) => info!("Session started"),
            AuthAction::Refresh(_) => info!("Session tokens refreshed"),
            AuthAction::Logout => info!("Session cleared"),
        }

        // Concurrent dispatches must leave memory and storage holding the same pair
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        self.state.send_modify(|state| {
            *state = std::mem::take(state).reduce(action);
        });

        match persist {
            Some(tokens) => self.storage.save(&tokens),
            None => self.storage.clear(),
        }
    }

    /// Store a freshly issued pair
    ///
    /// # Errors
    ///
    /// Returns an error if the pair cannot be persisted
    pub fn set_tokens(&self, tokens: TokenPair) -> Result<(), SessionError> {
        self.dispatch(AuthAction::Login(tokens))
    }

    /// Wipe both tokens from memory and storage
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be cleared
    pub fn clear_tokens(&self) -> Result<(), SessionError> {
        self.dispatch(AuthAction::Logout)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().access_token().map(str::to_string)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.borrow().refresh_token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe state changes, e.g. to re-render when the user logs out
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

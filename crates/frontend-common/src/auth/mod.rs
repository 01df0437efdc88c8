//! Authentication module

pub mod context;
pub mod error_messages;
pub mod flows;
pub mod guard;
pub mod storage;

// Re-export commonly used items
pub use context::{AuthAction, AuthState, Session, TokenPair};
pub use error_messages::user_message;
pub use flows::AuthFlowError;
pub use guard::{GuardDecision, Route, RouteGuard};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, SessionError, TokenStorage};

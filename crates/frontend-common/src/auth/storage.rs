//! Durable storage for the token pair
//!
//! The session mirrors every change into a [`TokenStorage`] so that a reload
//! or restart does not force the user to log in again.

use super::context::TokenPair;
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised while reading or writing persisted tokens
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persisted tokens are malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable medium for the token pair
#[cfg_attr(test, mockall::automock)]
pub trait TokenStorage: Send + Sync {
    /// Read the persisted pair, `None` when nothing is stored
    fn load(&self) -> Result<Option<TokenPair>, SessionError>;

    /// Persist the pair, replacing anything stored before
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// Remove the persisted pair; clearing empty storage is not an error
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a pair, as if persisted by an earlier run
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<TokenPair>>, SessionError> {
        self.tokens
            .lock()
            .map_err(|_| SessionError::Unavailable("memory storage lock poisoned".into()))
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        *self.slot()? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{SessionError, TokenPair, TokenStorage};
    use std::fs::{File, OpenOptions};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    /// JSON file on disk, the native counterpart of browser local storage
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut name = self.path.file_name().unwrap_or_default().to_os_string();
            name.push(".tmp");
            self.path.with_file_name(name)
        }
    }

    /// Create `path` readable by the owner only
    fn create_private(path: &Path) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(path)?;

        // A leftover file keeps its old mode, so tighten it explicitly
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(file)
    }

    impl TokenStorage for FileStorage {
        fn load(&self) -> Result<Option<TokenPair>, SessionError> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(tokens)?;

            // Write then rename so a crash never leaves a truncated token file
            let temp = self.temp_path();
            let mut file = create_private(&temp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            drop(file);
            std::fs::rename(&temp, &self.path)?;
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{SessionError, TokenPair, TokenStorage};
    use crate::config::AuthConfig;
    use gloo::storage::{LocalStorage as GlooLocalStorage, Storage, errors::StorageError};

    /// Browser `localStorage`, keyed by [`AuthConfig::AUTH_STATE_KEY`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorage;

    impl TokenStorage for LocalStorage {
        fn load(&self) -> Result<Option<TokenPair>, SessionError> {
            match GlooLocalStorage::get::<TokenPair>(AuthConfig::AUTH_STATE_KEY) {
                Ok(tokens) => Ok(Some(tokens)),
                Err(StorageError::KeyNotFound(_)) => Ok(None),
                Err(StorageError::SerdeError(err)) => Err(err.into()),
                Err(err) => Err(SessionError::Unavailable(err.to_string())),
            }
        }

        fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
            GlooLocalStorage::set(AuthConfig::AUTH_STATE_KEY, tokens)
                .map_err(|err| SessionError::Unavailable(err.to_string()))
        }

        fn clear(&self) -> Result<(), SessionError> {
            GlooLocalStorage::delete(AuthConfig::AUTH_STATE_KEY);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair::new("access-abc", "refresh-xyz")
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.save(&pair()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(pair()));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn file_storage_creates_parent_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("auth-storage.json"));

        assert_eq!(storage.load().unwrap(), None);
        storage.save(&pair()).unwrap();
        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), Some(pair()));

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        // Clearing twice is fine
        storage.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_private_to_the_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileStorage::new(&path);
        storage.save(&pair()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!dir.path().join("auth-storage.json.tmp").exists());
        assert_eq!(storage.load().unwrap(), Some(pair()));
    }

    #[test]
    fn file_storage_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStorage::new(path).load().unwrap_err();
        assert!(matches!(err, SessionError::Serialization(_)));
    }
}

//! Session store backends.
//!
//! DESIGN
//! ======
//! The token and the user blob live under two fixed keys and share one
//! lifecycle: written together by login, removed together by logout.
//! Writes are best-effort. A failed write is logged and any half-written
//! key is removed, so the next read reports "no session" instead of
//! surfacing an error.
//!
//! ## File layout
//!
//! ```text
//! <base_dir>/
//! ├── authToken    # raw token text
//! └── authUser     # user profile as JSON
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "authUser";

/// Persistence for the authenticated session.
pub trait SessionStore: Send + Sync {
    /// Persist `token` and `user`, replacing any prior session. Never fails.
    fn write(&self, token: &str, user: &Value);

    /// The stored token; an empty token counts as absent.
    fn read_token(&self) -> Option<String>;

    fn read_user(&self) -> Option<Value>;

    /// Remove both keys. Clearing an empty store is a no-op.
    fn clear(&self);

    fn is_active(&self) -> bool {
        self.read_token().is_some()
    }
}

fn present(token: String) -> Option<String> {
    (!token.is_empty()).then_some(token)
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-memory store for tests and one-shot sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<&'static str, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }
}

impl SessionStore for MemoryStore {
    fn write(&self, token: &str, user: &Value) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(TOKEN_KEY, token.to_owned());
        entries.insert(USER_KEY, user.to_string());
    }

    fn read_token(&self) -> Option<String> {
        present(self.get(TOKEN_KEY)?)
    }

    fn read_user(&self) -> Option<Value> {
        serde_json::from_str(&self.get(USER_KEY)?).ok()
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(TOKEN_KEY);
        entries.remove(USER_KEY);
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Filesystem-backed store; survives process restarts.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    fn try_write(&self, token: &str, user: &Value) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)?;
        let user = serde_json::to_string(user).map_err(std::io::Error::other)?;
        std::fs::write(self.key_path(TOKEN_KEY), token)?;
        std::fs::write(self.key_path(USER_KEY), user)?;
        Ok(())
    }

    fn remove_key(&self, key: &str) {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, key, "session key removal failed"),
        }
    }
}

impl SessionStore for FileStore {
    fn write(&self, token: &str, user: &Value) {
        if let Err(e) = self.try_write(token, user) {
            tracing::warn!(error = %e, dir = %self.base.display(), "session write failed; discarding session");
            self.clear();
        }
    }

    fn read_token(&self) -> Option<String> {
        present(std::fs::read_to_string(self.key_path(TOKEN_KEY)).ok()?)
    }

    fn read_user(&self) -> Option<Value> {
        let raw = std::fs::read_to_string(self.key_path(USER_KEY)).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn clear(&self) {
        self.remove_key(TOKEN_KEY);
        self.remove_key(USER_KEY);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

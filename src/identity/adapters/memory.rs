//! In-memory directory adapter for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::UserId,
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, String>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a developer with a display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Lookup`] when the backing store is
    /// poisoned.
    pub fn register(&self, user: UserId, display_name: impl Into<String>) -> UserDirectoryResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| UserDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        users.insert(user, display_name.into());
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn display_name(&self, user: &UserId) -> UserDirectoryResult<Option<String>> {
        let users = self
            .users
            .read()
            .map_err(|err| UserDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(users.get(user).cloned())
    }
}

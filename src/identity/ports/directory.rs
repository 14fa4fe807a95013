//! Directory port resolving developer identifiers to display names.

use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only view onto the external identity provider.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves a developer identifier to its display name.
    ///
    /// Returns `None` when the identifier is unknown to the provider.
    async fn display_name(&self, user: &UserId) -> UserDirectoryResult<Option<String>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Lookup against the identity provider failed.
    #[error("directory lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a provider lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}

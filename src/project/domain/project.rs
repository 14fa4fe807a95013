//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Role membership lists carried on each project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRoles {
    /// Developers who may claim subtasks and record time.
    pub developers: Vec<UserId>,
    /// Scrum masters who administer sprints.
    pub scrum_masters: Vec<UserId>,
    /// Product owners who evaluate stories.
    pub product_owners: Vec<UserId>,
}

/// Project aggregate root.
///
/// Project administration (creation forms, membership management) is outside
/// the engine; this type models the fields the engine reads and the name
/// invariant the repository enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    roles: ProjectRoles,
}

impl Project {
    /// Creates a project with a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ProjectDomainError> {
        let raw = name.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        Ok(Self {
            id: ProjectId::new(),
            name: normalized.to_owned(),
            description: description.into(),
            roles: ProjectRoles::default(),
        })
    }

    /// Sets the role membership lists.
    #[must_use]
    pub fn with_roles(mut self, roles: ProjectRoles) -> Self {
        self.roles = roles;
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the unique project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the role membership lists.
    #[must_use]
    pub const fn roles(&self) -> &ProjectRoles {
        &self.roles
    }
}

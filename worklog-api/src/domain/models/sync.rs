use std::fmt;

use thiserror::Error;

use super::ProjectId;

/// Credential the synchronizer presents to a project gateway.
#[derive(Clone, PartialEq, Eq)]
pub enum SyncAuthorization {
    /// Direct store access; nothing to present.
    InProcess,
    /// Bearer token obtained from the system login.
    Bearer(String),
}

impl SyncAuthorization {
    pub fn is_present(&self) -> bool {
        match self {
            Self::InProcess => true,
            Self::Bearer(token) => !token.is_empty(),
        }
    }
}

impl fmt::Debug for SyncAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProcess => f.write_str("InProcess"),
            Self::Bearer(_) => f.write_str("Bearer([redacted])"),
        }
    }
}

/// Why a synchronization did not land.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error("missing project, user, work id or authorization")]
    InvalidInput,
    #[error("system login failed: {0}")]
    Auth(String),
    #[error("project {0} could not be fetched")]
    ProjectNotFound(ProjectId),
    #[error("project was modified concurrently")]
    Conflict,
    #[error("project update rejected: {0}")]
    Rejected(String),
}

/// Result of keeping a project's contributor and work lists in step with a
/// newly logged work entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synchronized { contributor_added: bool },
    Degraded(SyncFailure),
}

impl SyncOutcome {
    pub fn is_synchronized(&self) -> bool {
        matches!(self, Self::Synchronized { .. })
    }
}

/// How hard the synchronizer tries to keep concurrent merges safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Push with the fetched version so stale writes are rejected.
    pub optimistic_concurrency: bool,
    /// Total fetch/merge/push attempts when a push conflicts.
    pub max_attempts: u32,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            optimistic_concurrency: true,
            max_attempts: 3,
        }
    }
}

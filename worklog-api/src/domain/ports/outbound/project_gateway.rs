//! Project gateway port (outbound).
//!
//! The contributor synchronizer reaches projects through this port rather
//! than the store directly, so the same merge logic can run in-process or
//! through the service's own HTTP API.

use async_trait::async_trait;

use crate::domain::models::{Project, ProjectId, SyncAuthorization, SyncFailure};

#[async_trait]
pub trait ProjectGateway: Send + Sync + 'static {
    /// Obtain whatever the gateway needs to read and write projects.
    async fn authorize(&self) -> Result<SyncAuthorization, SyncFailure>;

    /// Fetch a project. Every failure collapses into `None`.
    async fn fetch_project(
        &self,
        id: &ProjectId,
        authorization: &SyncAuthorization,
    ) -> Option<Project>;

    /// Write the whole project back.
    ///
    /// With `expected_version`, a stale write fails with `SyncFailure::Conflict`.
    async fn push_project(
        &self,
        project: &Project,
        authorization: &SyncAuthorization,
        expected_version: Option<u64>,
    ) -> Result<(), SyncFailure>;
}

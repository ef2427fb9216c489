use async_trait::async_trait;

use crate::domain::{
    models::{LoggedWork, LoggedWorkDraft, LoggedWorkId, SyncOutcome, UserId},
    WorklogError,
};

/// A stored work entry together with what happened to its project.
#[derive(Debug, Clone)]
pub struct LoggedWorkCreated {
    pub work: LoggedWork,
    pub sync: SyncOutcome,
}

/// Inbound port for logged work use cases.
#[async_trait]
pub trait LoggedWorkService: Send + Sync + 'static {
    /// Persist a work entry, then bring its project's contributor and work
    /// lists up to date on behalf of `actor`.
    ///
    /// Only validation and storage failures of the entry itself are errors;
    /// a failed synchronization is reported in [`LoggedWorkCreated::sync`].
    async fn create_logged_work(
        &self,
        actor: &UserId,
        draft: LoggedWorkDraft,
    ) -> Result<LoggedWorkCreated, WorklogError>;

    async fn list_logged_work(&self) -> Result<Vec<LoggedWork>, WorklogError>;

    async fn get_logged_work(&self, id: &LoggedWorkId) -> Result<LoggedWork, WorklogError>;

    async fn update_logged_work(
        &self,
        id: &LoggedWorkId,
        draft: LoggedWorkDraft,
    ) -> Result<LoggedWork, WorklogError>;

    async fn delete_logged_work(&self, id: &LoggedWorkId) -> Result<(), WorklogError>;
}

//! Logged work store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{LoggedWork, LoggedWorkId, NewLoggedWork},
    WorklogError,
};

#[async_trait]
pub trait LoggedWorkRepository: Send + Sync + 'static {
    async fn insert(&self, work: NewLoggedWork) -> Result<LoggedWork, WorklogError>;

    async fn list(&self) -> Result<Vec<LoggedWork>, WorklogError>;

    async fn get(&self, id: &LoggedWorkId) -> Result<Option<LoggedWork>, WorklogError>;

    async fn update(&self, work: &LoggedWork) -> Result<LoggedWork, WorklogError>;

    async fn delete(&self, id: &LoggedWorkId) -> Result<bool, WorklogError>;
}

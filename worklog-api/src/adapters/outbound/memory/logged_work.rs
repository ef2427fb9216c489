use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{LoggedWork, LoggedWorkId, NewLoggedWork},
    ports::outbound::LoggedWorkRepository,
    WorklogError,
};

#[derive(Default)]
pub struct MemoryLoggedWorkRepository {
    entries: RwLock<Vec<LoggedWork>>,
}

impl MemoryLoggedWorkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggedWorkRepository for MemoryLoggedWorkRepository {
    async fn insert(&self, work: NewLoggedWork) -> Result<LoggedWork, WorklogError> {
        let work = work.into_logged_work(LoggedWorkId::generate());
        self.entries.write().await.push(work.clone());
        Ok(work)
    }

    async fn list(&self) -> Result<Vec<LoggedWork>, WorklogError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get(&self, id: &LoggedWorkId) -> Result<Option<LoggedWork>, WorklogError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|w| &w.id == id)
            .cloned())
    }

    async fn update(&self, work: &LoggedWork) -> Result<LoggedWork, WorklogError> {
        let mut entries = self.entries.write().await;
        let stored = entries
            .iter_mut()
            .find(|w| w.id == work.id)
            .ok_or_else(|| WorklogError::not_found(format_args!("logged work {}", work.id)))?;

        *stored = work.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: &LoggedWorkId) -> Result<bool, WorklogError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|w| &w.id != id);
        Ok(entries.len() != before)
    }
}

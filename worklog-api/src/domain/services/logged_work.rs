use std::sync::Arc;

use async_trait::async_trait;

use super::ContributorSynchronizer;
use crate::domain::{
    models::{LoggedWork, LoggedWorkDraft, LoggedWorkId, NewLoggedWork, UserId},
    ports::{
        inbound::{LoggedWorkCreated, LoggedWorkService},
        outbound::{LoggedWorkRepository, ProjectGateway},
    },
    WorklogError,
};

/// Implementation of the LoggedWorkService inbound port.
///
/// Creating an entry is a two-step, non-transactional write: the entry is
/// stored first, then its project is synchronized through the gateway.
pub struct LoggedWorkServiceImpl<W: ?Sized, G: ?Sized> {
    repo: Arc<W>,
    synchronizer: ContributorSynchronizer<G>,
}

impl<W: ?Sized, G: ?Sized> LoggedWorkServiceImpl<W, G> {
    pub fn new(repo: Arc<W>, synchronizer: ContributorSynchronizer<G>) -> Self {
        Self { repo, synchronizer }
    }
}

#[async_trait]
impl<W, G> LoggedWorkService for LoggedWorkServiceImpl<W, G>
where
    W: LoggedWorkRepository + ?Sized,
    G: ProjectGateway + ?Sized,
{
    async fn create_logged_work(
        &self,
        actor: &UserId,
        draft: LoggedWorkDraft,
    ) -> Result<LoggedWorkCreated, WorklogError> {
        let new_work = NewLoggedWork::try_from(draft)?;
        let work = self.repo.insert(new_work).await?;

        tracing::info!(
            work_id = %work.id,
            project_id = %work.project,
            "logged work created"
        );

        let sync = self
            .synchronizer
            .synchronize(&work.project, actor, &work.id)
            .await;

        Ok(LoggedWorkCreated { work, sync })
    }

    async fn list_logged_work(&self) -> Result<Vec<LoggedWork>, WorklogError> {
        self.repo.list().await
    }

    async fn get_logged_work(&self, id: &LoggedWorkId) -> Result<LoggedWork, WorklogError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| WorklogError::not_found(format_args!("logged work {id}")))
    }

    async fn update_logged_work(
        &self,
        id: &LoggedWorkId,
        draft: LoggedWorkDraft,
    ) -> Result<LoggedWork, WorklogError> {
        let mut work = self.get_logged_work(id).await?;
        work.apply(draft)?;
        self.repo.update(&work).await
    }

    async fn delete_logged_work(&self, id: &LoggedWorkId) -> Result<(), WorklogError> {
        if !self.repo.delete(id).await? {
            return Err(WorklogError::not_found(format_args!("logged work {id}")));
        }

        tracing::info!(work_id = %id, "logged work deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::{
            gateway::StoreProjectGateway,
            memory::{MemoryLoggedWorkRepository, MemoryProjectRepository},
        },
        domain::{
            models::{NewProject, ProjectId, SyncFailure, SyncOutcome, SyncPolicy},
            ports::outbound::ProjectRepository,
        },
    };

    type Service = LoggedWorkServiceImpl<
        MemoryLoggedWorkRepository,
        StoreProjectGateway<MemoryProjectRepository>,
    >;

    fn service(projects: Arc<MemoryProjectRepository>) -> Service {
        let gateway = Arc::new(StoreProjectGateway::new(projects));
        LoggedWorkServiceImpl::new(
            Arc::new(MemoryLoggedWorkRepository::new()),
            ContributorSynchronizer::new(gateway, SyncPolicy::default()),
        )
    }

    fn draft(user: &str, project: &str) -> LoggedWorkDraft {
        LoggedWorkDraft {
            user: Some(user.to_string()),
            project: Some(project.to_string()),
            details: Some("dug a ditch".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_synchronizes_project() {
        let projects = Arc::new(MemoryProjectRepository::new());
        let project = projects.insert(NewProject::new("Roads")).await.unwrap();
        let service = service(projects.clone());

        let created = service
            .create_logged_work(&UserId::new("u1"), draft("u1", project.id.as_str()))
            .await
            .unwrap();

        assert_eq!(
            created.sync,
            SyncOutcome::Synchronized {
                contributor_added: true
            }
        );
        let stored = projects.get(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.contributors, vec![UserId::new("u1")]);
        assert_eq!(stored.project_work, vec![created.work.id]);
    }

    #[tokio::test]
    async fn create_is_kept_when_project_is_unknown() {
        let service = service(Arc::new(MemoryProjectRepository::new()));

        let created = service
            .create_logged_work(&UserId::new("u1"), draft("u1", "bogus"))
            .await
            .unwrap();

        assert_eq!(
            created.sync,
            SyncOutcome::Degraded(SyncFailure::ProjectNotFound(ProjectId::new("bogus")))
        );
        let stored = service.get_logged_work(&created.work.id).await.unwrap();
        assert_eq!(stored.details.as_deref(), Some("dug a ditch"));
    }

    #[tokio::test]
    async fn create_without_user_stores_nothing() {
        let service = service(Arc::new(MemoryProjectRepository::new()));

        let err = service
            .create_logged_work(
                &UserId::new("u1"),
                LoggedWorkDraft {
                    project: Some("p1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Path `user` is required"));
        assert!(service.list_logged_work().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_project_reassignment() {
        let service = service(Arc::new(MemoryProjectRepository::new()));
        let created = service
            .create_logged_work(&UserId::new("u1"), draft("u1", "p1"))
            .await
            .unwrap();

        let err = service
            .update_logged_work(
                &created.work.id,
                LoggedWorkDraft {
                    project: Some("p2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WorklogError::Validation(_)));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_entry_are_not_found() {
        let service = service(Arc::new(MemoryProjectRepository::new()));
        let id = LoggedWorkId::new("nope");

        assert!(matches!(
            service
                .update_logged_work(&id, LoggedWorkDraft::default())
                .await
                .unwrap_err(),
            WorklogError::NotFound(_)
        ));
        assert!(matches!(
            service.delete_logged_work(&id).await.unwrap_err(),
            WorklogError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn update_changes_hours() {
        let service = service(Arc::new(MemoryProjectRepository::new()));
        let created = service
            .create_logged_work(&UserId::new("u1"), draft("u1", "p1"))
            .await
            .unwrap();

        let updated = service
            .update_logged_work(
                &created.work.id,
                LoggedWorkDraft {
                    hours: Some(4.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.hours, Some(4.0));
        assert_eq!(
            service.get_logged_work(&created.work.id).await.unwrap(),
            updated
        );
    }
}

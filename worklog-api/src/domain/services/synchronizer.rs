use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    models::{
        LoggedWorkId, Project, ProjectId, SyncAuthorization, SyncFailure, SyncOutcome, SyncPolicy,
        UserId,
    },
    ports::outbound::ProjectGateway,
};

/// Keeps a project's `contributors` and `project_work` lists in step with
/// newly logged work.
///
/// This is a best-effort secondary write: it never fails the caller, it
/// reports a [`SyncOutcome`] instead.
pub struct ContributorSynchronizer<G: ?Sized> {
    gateway: Arc<G>,
    policy: SyncPolicy,
}

impl<G: ProjectGateway + ?Sized> ContributorSynchronizer<G> {
    pub fn new(gateway: Arc<G>, policy: SyncPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Authorize, fetch the project, merge the contribution and push it back.
    #[instrument(skip_all, fields(%project_id, %user_id, %work_id))]
    pub async fn synchronize(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        work_id: &LoggedWorkId,
    ) -> SyncOutcome {
        let outcome = self.run(project_id, user_id, work_id).await;

        match &outcome {
            SyncOutcome::Synchronized { contributor_added } => {
                tracing::info!(contributor_added, "project synchronized");
            }
            SyncOutcome::Degraded(reason) => {
                tracing::warn!(%reason, "project synchronization failed, logged work kept");
            }
        }

        outcome
    }

    async fn run(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        work_id: &LoggedWorkId,
    ) -> SyncOutcome {
        if project_id.is_empty() || user_id.is_empty() || work_id.is_empty() {
            return SyncOutcome::Degraded(SyncFailure::InvalidInput);
        }

        let authorization = match self.gateway.authorize().await {
            Ok(authorization) => authorization,
            Err(failure) => return SyncOutcome::Degraded(failure),
        };

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let Some(project) = self.gateway.fetch_project(project_id, &authorization).await
            else {
                return SyncOutcome::Degraded(SyncFailure::ProjectNotFound(project_id.clone()));
            };

            match self.sync(project, user_id, &authorization, work_id).await {
                SyncOutcome::Degraded(SyncFailure::Conflict) if attempt < max_attempts => {
                    tracing::debug!(attempt, "project changed underneath the merge, retrying");
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    /// Merge one contribution into an already fetched `project` and push it.
    ///
    /// `work_id` is appended unconditionally; `user_id` only if it is not a
    /// contributor yet.
    pub async fn sync(
        &self,
        mut project: Project,
        user_id: &UserId,
        authorization: &SyncAuthorization,
        work_id: &LoggedWorkId,
    ) -> SyncOutcome {
        if project.id.is_empty()
            || user_id.is_empty()
            || work_id.is_empty()
            || !authorization.is_present()
        {
            return SyncOutcome::Degraded(SyncFailure::InvalidInput);
        }

        let expected_version = self
            .policy
            .optimistic_concurrency
            .then_some(project.version);
        let contributor_added = project.record_contribution(user_id, work_id);

        match self
            .gateway
            .push_project(&project, authorization, expected_version)
            .await
        {
            Ok(()) => SyncOutcome::Synchronized { contributor_added },
            Err(failure) => SyncOutcome::Degraded(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        adapters::outbound::{gateway::StoreProjectGateway, memory::MemoryProjectRepository},
        domain::{
            models::NewProject,
            ports::outbound::ProjectRepository,
        },
    };

    type StoreSynchronizer = ContributorSynchronizer<StoreProjectGateway<MemoryProjectRepository>>;

    async fn setup(policy: SyncPolicy) -> (Arc<MemoryProjectRepository>, StoreSynchronizer, Project) {
        let repo = Arc::new(MemoryProjectRepository::new());
        let project = repo.insert(NewProject::new("Roads")).await.unwrap();
        let gateway = Arc::new(StoreProjectGateway::new(repo.clone()));
        (repo, ContributorSynchronizer::new(gateway, policy), project)
    }

    #[tokio::test]
    async fn adds_new_contributor_and_work() {
        let (repo, sync, project) = setup(SyncPolicy::default()).await;

        let outcome = sync
            .synchronize(&project.id, &UserId::new("u1"), &LoggedWorkId::new("w1"))
            .await;

        assert_eq!(
            outcome,
            SyncOutcome::Synchronized {
                contributor_added: true
            }
        );
        let stored = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.contributors, vec![UserId::new("u1")]);
        assert_eq!(stored.project_work, vec![LoggedWorkId::new("w1")]);
    }

    #[tokio::test]
    async fn existing_contributor_is_not_duplicated() {
        let (repo, sync, project) = setup(SyncPolicy::default()).await;
        let user = UserId::new("u1");

        sync.synchronize(&project.id, &user, &LoggedWorkId::new("w1"))
            .await;
        let outcome = sync
            .synchronize(&project.id, &user, &LoggedWorkId::new("w2"))
            .await;

        assert_eq!(
            outcome,
            SyncOutcome::Synchronized {
                contributor_added: false
            }
        );
        let stored = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.contributors.len(), 1);
        assert_eq!(stored.project_work.len(), 2);
    }

    #[tokio::test]
    async fn unknown_project_degrades_without_mutation() {
        let (repo, sync, project) = setup(SyncPolicy::default()).await;

        let outcome = sync
            .synchronize(
                &ProjectId::new("bogus"),
                &UserId::new("u1"),
                &LoggedWorkId::new("w1"),
            )
            .await;

        assert_eq!(
            outcome,
            SyncOutcome::Degraded(SyncFailure::ProjectNotFound(ProjectId::new("bogus")))
        );
        assert_eq!(repo.get(&project.id).await.unwrap().unwrap(), project);
    }

    #[tokio::test]
    async fn empty_inputs_are_rejected_without_side_effects() {
        let (repo, sync, project) = setup(SyncPolicy::default()).await;

        let outcome = sync
            .synchronize(&project.id, &UserId::new(""), &LoggedWorkId::new("w1"))
            .await;
        assert_eq!(outcome, SyncOutcome::Degraded(SyncFailure::InvalidInput));

        let outcome = sync
            .sync(
                project.clone(),
                &UserId::new("u1"),
                &SyncAuthorization::Bearer(String::new()),
                &LoggedWorkId::new("w1"),
            )
            .await;
        assert_eq!(outcome, SyncOutcome::Degraded(SyncFailure::InvalidInput));

        assert_eq!(repo.get(&project.id).await.unwrap().unwrap(), project);
    }

    #[tokio::test]
    async fn racing_merges_without_version_check_lose_an_update() {
        let policy = SyncPolicy {
            optimistic_concurrency: false,
            ..Default::default()
        };
        let (repo, sync, project) = setup(policy).await;

        // Both requests fetch before either pushes.
        let first = repo.get(&project.id).await.unwrap().unwrap();
        let second = repo.get(&project.id).await.unwrap().unwrap();

        let a = sync
            .sync(
                first,
                &UserId::new("u1"),
                &SyncAuthorization::InProcess,
                &LoggedWorkId::new("w1"),
            )
            .await;
        let b = sync
            .sync(
                second,
                &UserId::new("u2"),
                &SyncAuthorization::InProcess,
                &LoggedWorkId::new("w2"),
            )
            .await;

        // Both report success, but the later push wins.
        assert!(a.is_synchronized());
        assert!(b.is_synchronized());
        let stored = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.contributors, vec![UserId::new("u2")]);
        assert_eq!(stored.project_work, vec![LoggedWorkId::new("w2")]);
    }

    #[tokio::test]
    async fn racing_merges_with_version_check_detect_the_conflict() {
        let (repo, sync, project) = setup(SyncPolicy::default()).await;

        let first = repo.get(&project.id).await.unwrap().unwrap();
        let second = repo.get(&project.id).await.unwrap().unwrap();

        let a = sync
            .sync(
                first,
                &UserId::new("u1"),
                &SyncAuthorization::InProcess,
                &LoggedWorkId::new("w1"),
            )
            .await;
        let b = sync
            .sync(
                second,
                &UserId::new("u2"),
                &SyncAuthorization::InProcess,
                &LoggedWorkId::new("w2"),
            )
            .await;

        assert!(a.is_synchronized());
        assert_eq!(b, SyncOutcome::Degraded(SyncFailure::Conflict));
        let stored = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.project_work, vec![LoggedWorkId::new("w1")]);
    }

    /// Lands a competing contribution right before the first push.
    struct RacingGateway {
        inner: StoreProjectGateway<MemoryProjectRepository>,
        repo: Arc<MemoryProjectRepository>,
        raced: AtomicBool,
    }

    #[async_trait]
    impl ProjectGateway for RacingGateway {
        async fn authorize(&self) -> Result<SyncAuthorization, SyncFailure> {
            self.inner.authorize().await
        }

        async fn fetch_project(
            &self,
            id: &ProjectId,
            authorization: &SyncAuthorization,
        ) -> Option<Project> {
            self.inner.fetch_project(id, authorization).await
        }

        async fn push_project(
            &self,
            project: &Project,
            authorization: &SyncAuthorization,
            expected_version: Option<u64>,
        ) -> Result<(), SyncFailure> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                let mut competing = self.repo.get(&project.id).await.unwrap().unwrap();
                competing.record_contribution(&UserId::new("rival"), &LoggedWorkId::new("w0"));
                self.repo.replace(&competing, None).await.unwrap();
            }
            self.inner
                .push_project(project, authorization, expected_version)
                .await
        }
    }

    #[tokio::test]
    async fn conflicting_push_is_retried_with_a_fresh_fetch() {
        let repo = Arc::new(MemoryProjectRepository::new());
        let project = repo.insert(NewProject::new("Roads")).await.unwrap();
        let gateway = Arc::new(RacingGateway {
            inner: StoreProjectGateway::new(repo.clone()),
            repo: repo.clone(),
            raced: AtomicBool::new(false),
        });
        let sync = ContributorSynchronizer::new(gateway, SyncPolicy::default());

        let outcome = sync
            .synchronize(&project.id, &UserId::new("u1"), &LoggedWorkId::new("w1"))
            .await;

        assert!(outcome.is_synchronized());
        let stored = repo.get(&project.id).await.unwrap().unwrap();
        assert_eq!(
            stored.contributors,
            vec![UserId::new("rival"), UserId::new("u1")]
        );
        assert_eq!(
            stored.project_work,
            vec![LoggedWorkId::new("w0"), LoggedWorkId::new("w1")]
        );
    }

    #[tokio::test]
    async fn conflicts_give_up_after_max_attempts() {
        let repo = Arc::new(MemoryProjectRepository::new());
        let project = repo.insert(NewProject::new("Roads")).await.unwrap();
        let gateway = Arc::new(RacingGateway {
            inner: StoreProjectGateway::new(repo.clone()),
            repo: repo.clone(),
            raced: AtomicBool::new(false),
        });
        let policy = SyncPolicy {
            optimistic_concurrency: true,
            max_attempts: 1,
        };
        let sync = ContributorSynchronizer::new(gateway, policy);

        let outcome = sync
            .synchronize(&project.id, &UserId::new("u1"), &LoggedWorkId::new("w1"))
            .await;

        assert_eq!(outcome, SyncOutcome::Degraded(SyncFailure::Conflict));
    }

    struct LockedOutGateway;

    #[async_trait]
    impl ProjectGateway for LockedOutGateway {
        async fn authorize(&self) -> Result<SyncAuthorization, SyncFailure> {
            Err(SyncFailure::Auth("credential file missing".to_string()))
        }

        async fn fetch_project(&self, _: &ProjectId, _: &SyncAuthorization) -> Option<Project> {
            panic!("fetch must not run without authorization")
        }

        async fn push_project(
            &self,
            _: &Project,
            _: &SyncAuthorization,
            _: Option<u64>,
        ) -> Result<(), SyncFailure> {
            panic!("push must not run without authorization")
        }
    }

    #[tokio::test]
    async fn failed_login_degrades() {
        let sync = ContributorSynchronizer::new(Arc::new(LockedOutGateway), SyncPolicy::default());

        let outcome = sync
            .synchronize(
                &ProjectId::new("p1"),
                &UserId::new("u1"),
                &LoggedWorkId::new("w1"),
            )
            .await;

        assert!(matches!(
            outcome,
            SyncOutcome::Degraded(SyncFailure::Auth(_))
        ));
    }
}

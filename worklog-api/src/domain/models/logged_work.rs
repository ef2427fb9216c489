use time::OffsetDateTime;

use super::{LoggedWorkId, ProjectId};
use crate::domain::ValidationError;

const MODEL: &str = "loggedWork";

/// A single time/activity entry attributed to a user and a project.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedWork {
    pub id: LoggedWorkId,
    pub user: String,
    pub type_of_work: Option<String>,
    pub project: ProjectId,
    pub start_time: OffsetDateTime,
    pub end_time: Option<OffsetDateTime>,
    pub details: Option<String>,
    pub hours: Option<f64>,
}

impl LoggedWork {
    /// Merge the fields present in `draft` onto this entry.
    ///
    /// The project reference cannot change once the entry exists.
    pub fn apply(&mut self, draft: LoggedWorkDraft) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new(MODEL);

        if let Some(project) = &draft.project {
            if project.as_str() != self.project.as_str() {
                errors = errors.invalid("project", "Path `project` cannot be reassigned.");
            }
        }
        if let Some(user) = &draft.user {
            if user.trim().is_empty() {
                errors = errors.required("user");
            }
        }
        errors.into_result()?;

        if let Some(user) = draft.user {
            self.user = user;
        }
        if let Some(type_of_work) = draft.type_of_work {
            self.type_of_work = Some(type_of_work);
        }
        if let Some(start_time) = draft.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = draft.end_time {
            self.end_time = Some(end_time);
        }
        if let Some(details) = draft.details {
            self.details = Some(details);
        }
        if let Some(hours) = draft.hours {
            self.hours = Some(hours);
        }

        Ok(())
    }
}

/// Unvalidated input for creating or updating a logged work entry.
#[derive(Debug, Clone, Default)]
pub struct LoggedWorkDraft {
    pub user: Option<String>,
    pub type_of_work: Option<String>,
    pub project: Option<String>,
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub details: Option<String>,
    pub hours: Option<f64>,
}

/// A validated entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoggedWork {
    pub user: String,
    pub type_of_work: Option<String>,
    pub project: ProjectId,
    pub start_time: OffsetDateTime,
    pub end_time: Option<OffsetDateTime>,
    pub details: Option<String>,
    pub hours: Option<f64>,
}

impl NewLoggedWork {
    pub fn into_logged_work(self, id: LoggedWorkId) -> LoggedWork {
        LoggedWork {
            id,
            user: self.user,
            type_of_work: self.type_of_work,
            project: self.project,
            start_time: self.start_time,
            end_time: self.end_time,
            details: self.details,
            hours: self.hours,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<LoggedWorkDraft> for NewLoggedWork {
    type Error = ValidationError;

    fn try_from(draft: LoggedWorkDraft) -> Result<Self, Self::Error> {
        let user = present(draft.user);
        let project = present(draft.project);

        let mut errors = ValidationError::new(MODEL);
        if user.is_none() {
            errors = errors.required("user");
        }
        if project.is_none() {
            errors = errors.required("project");
        }

        let (Some(user), Some(project)) = (user, project) else {
            return Err(errors);
        };

        Ok(Self {
            user,
            type_of_work: draft.type_of_work,
            project: ProjectId::new(project),
            start_time: draft
                .start_time
                .unwrap_or_else(OffsetDateTime::now_utc),
            end_time: draft.end_time,
            details: draft.details,
            hours: draft.hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(user: Option<&str>, project: Option<&str>) -> LoggedWorkDraft {
        LoggedWorkDraft {
            user: user.map(String::from),
            project: project.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_defaults_start_time_to_now() {
        let before = OffsetDateTime::now_utc();
        let work = NewLoggedWork::try_from(draft(Some("u1"), Some("p1"))).unwrap();

        assert_eq!(work.user, "u1");
        assert_eq!(work.project, ProjectId::new("p1"));
        assert!(work.start_time >= before);
    }

    #[test]
    fn missing_user_is_reported() {
        let err = NewLoggedWork::try_from(draft(None, Some("p1"))).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("Path `user` is required"));
        assert!(!message.contains("Path `project` is required"));
    }

    #[test]
    fn missing_user_and_project_are_both_reported() {
        let err = NewLoggedWork::try_from(draft(None, Some(""))).unwrap_err();

        assert_eq!(
            err.to_string(),
            "loggedWork validation failed: user: Path `user` is required., project: Path `project` is required."
        );
    }

    #[test]
    fn project_cannot_be_reassigned() {
        let mut work = NewLoggedWork::try_from(draft(Some("u1"), Some("p1")))
            .unwrap()
            .into_logged_work(LoggedWorkId::new("w1"));

        let err = work.apply(draft(None, Some("p2"))).unwrap_err();
        assert_eq!(err.fields()[0].path, "project");
        assert_eq!(work.project, ProjectId::new("p1"));
    }

    #[test]
    fn apply_updates_details_and_keeps_the_rest() {
        let mut work = NewLoggedWork::try_from(draft(Some("u1"), Some("p1")))
            .unwrap()
            .into_logged_work(LoggedWorkId::new("w1"));

        work.apply(LoggedWorkDraft {
            details: Some("fixed the pump".to_string()),
            hours: Some(2.5),
            project: Some("p1".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(work.details.as_deref(), Some("fixed the pump"));
        assert_eq!(work.hours, Some(2.5));
        assert_eq!(work.user, "u1");
    }
}

use super::{LoggedWorkId, ProjectId, UserId};
use crate::domain::ValidationError;

const MODEL: &str = "project";

/// A unit of work that users log time against.
///
/// `contributors` and `project_work` are denormalized indexes kept up to date
/// by the contributor synchronizer when work is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Vec<UserId>,
    pub project_work: Vec<LoggedWorkId>,
    pub types_of_work: Vec<String>,
    /// Bumped by the store on every successful write.
    pub version: u64,
}

impl Project {
    pub fn has_contributor(&self, user_id: &UserId) -> bool {
        self.contributors
            .iter()
            .any(|contributor| contributor.as_str().trim() == user_id.as_str().trim())
    }

    /// Record that `user_id` logged `work_id` on this project.
    ///
    /// The work id is always appended; the user is only appended when not
    /// already a contributor. Returns whether the user was added.
    pub fn record_contribution(&mut self, user_id: &UserId, work_id: &LoggedWorkId) -> bool {
        self.project_work.push(work_id.clone());

        if self.has_contributor(user_id) {
            return false;
        }

        self.contributors.push(user_id.clone());
        true
    }

    /// Merge `changes` onto this project, field by field.
    pub fn apply(&mut self, changes: ProjectChanges) -> Result<(), ValidationError> {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(project_lead) = changes.project_lead {
            self.project_lead = Some(project_lead);
        }
        if let Some(brief_content) = changes.brief_content {
            self.brief_content = Some(brief_content);
        }
        if let Some(extended_content) = changes.extended_content {
            self.extended_content = Some(extended_content);
        }
        if let Some(project_contact) = changes.project_contact {
            self.project_contact = Some(project_contact);
        }
        if let Some(contributors) = changes.contributors {
            self.contributors = contributors;
        }
        if let Some(project_work) = changes.project_work {
            self.project_work = project_work;
        }
        if let Some(types_of_work) = changes.types_of_work {
            self.types_of_work = types_of_work;
        }

        if self.title.trim().is_empty() {
            return Err(ValidationError::new(MODEL).required("title"));
        }

        Ok(())
    }
}

/// Unvalidated input for creating a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: Option<String>,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Vec<UserId>,
    pub project_work: Vec<LoggedWorkId>,
    pub types_of_work: Vec<String>,
}

/// A validated project that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Vec<UserId>,
    pub project_work: Vec<LoggedWorkId>,
    pub types_of_work: Vec<String>,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_lead: None,
            brief_content: None,
            extended_content: None,
            project_contact: None,
            contributors: Vec::new(),
            project_work: Vec::new(),
            types_of_work: Vec::new(),
        }
    }

    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            title: self.title,
            project_lead: self.project_lead,
            brief_content: self.brief_content,
            extended_content: self.extended_content,
            project_contact: self.project_contact,
            contributors: self.contributors,
            project_work: self.project_work,
            types_of_work: self.types_of_work,
            version: 0,
        }
    }
}

impl TryFrom<ProjectDraft> for NewProject {
    type Error = ValidationError;

    fn try_from(draft: ProjectDraft) -> Result<Self, Self::Error> {
        let title = match draft.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ValidationError::new(MODEL).required("title")),
        };

        Ok(Self {
            title,
            project_lead: draft.project_lead,
            brief_content: draft.brief_content,
            extended_content: draft.extended_content,
            project_contact: draft.project_contact,
            contributors: draft.contributors,
            project_work: draft.project_work,
            types_of_work: draft.types_of_work,
        })
    }
}

/// A partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Option<Vec<UserId>>,
    pub project_work: Option<Vec<LoggedWorkId>>,
    pub types_of_work: Option<Vec<String>>,
    /// When set, the update only lands if the stored version still matches.
    pub expected_version: Option<u64>,
}

use worklog_client::ProjectDocument;

use crate::domain::models::{LoggedWorkId, Project, ProjectId, UserId};

/// Convert a project read over HTTP into a domain Project.
///
/// A document without a version is treated as version 0.
pub fn to_domain_project(doc: ProjectDocument) -> Project {
    Project {
        id: ProjectId::new(doc.id),
        title: doc.title,
        project_lead: doc.project_lead,
        brief_content: doc.brief_content,
        extended_content: doc.extended_content,
        project_contact: doc.project_contact,
        contributors: doc.contributors.into_iter().map(UserId::new).collect(),
        project_work: doc.project_work.into_iter().map(LoggedWorkId::new).collect(),
        types_of_work: doc.types_of_work,
        version: doc.version.unwrap_or_default(),
    }
}

/// Convert a domain Project into the document pushed back over HTTP.
pub fn to_document(project: &Project, expected_version: Option<u64>) -> ProjectDocument {
    ProjectDocument {
        id: project.id.to_string(),
        title: project.title.clone(),
        project_lead: project.project_lead.clone(),
        brief_content: project.brief_content.clone(),
        extended_content: project.extended_content.clone(),
        project_contact: project.project_contact.clone(),
        contributors: project.contributors.iter().map(|id| id.to_string()).collect(),
        project_work: project.project_work.iter().map(|id| id.to_string()).collect(),
        types_of_work: project.types_of_work.clone(),
        version: expected_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trip_keeps_lists() {
        let doc = ProjectDocument {
            id: "p1".to_string(),
            title: "Roads".to_string(),
            contributors: vec!["u1".to_string()],
            project_work: vec!["w1".to_string(), "w2".to_string()],
            version: Some(4),
            ..Default::default()
        };

        let project = to_domain_project(doc);
        assert_eq!(project.version, 4);
        assert_eq!(project.contributors, vec![UserId::new("u1")]);

        let back = to_document(&project, None);
        assert_eq!(back.project_work, vec!["w1", "w2"]);
        assert_eq!(back.version, None);
    }
}

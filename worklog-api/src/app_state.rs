use std::sync::Arc;

use crate::domain::ports::inbound::{AuthService, LoggedWorkService, ProjectService};

#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectService>,
    pub logged_work_service: Arc<dyn LoggedWorkService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    pub fn new(
        project_service: Arc<dyn ProjectService>,
        logged_work_service: Arc<dyn LoggedWorkService>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            project_service,
            logged_work_service,
            auth_service,
        }
    }
}

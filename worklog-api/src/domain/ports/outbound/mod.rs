mod logged_work_repository;
mod project_gateway;
mod project_repository;
mod user_repository;

pub use logged_work_repository::*;
pub use project_gateway::*;
pub use project_repository::*;
pub use user_repository::*;

mod auth;
mod logged_work;
mod projects;
mod synchronizer;

pub use auth::AuthServiceImpl;
pub use logged_work::LoggedWorkServiceImpl;
pub use projects::ProjectServiceImpl;
pub use synchronizer::ContributorSynchronizer;

mod auth;
mod logged_work;
mod projects;

pub use auth::*;
pub use logged_work::*;
pub use projects::*;

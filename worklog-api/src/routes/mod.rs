pub(crate) mod error;
pub(crate) mod logged_work;
pub(crate) mod projects;
pub(crate) mod users;

pub(crate) use error::ApiError;

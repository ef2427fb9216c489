mod auth;
mod client;
mod document;
mod worklog_url;

pub use worklog_url::*;

pub use auth::*;
pub use client::*;
pub use document::*;

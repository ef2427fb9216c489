//! In-memory stores.
//!
//! Selected with `database.backend: memory`; also the test doubles for the
//! service layer.

mod logged_work;
mod projects;
mod users;

pub use logged_work::MemoryLoggedWorkRepository;
pub use projects::MemoryProjectRepository;
pub use users::MemoryUserRepository;

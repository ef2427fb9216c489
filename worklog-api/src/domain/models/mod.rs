mod ids;
mod logged_work;
mod project;
mod sync;
mod user;

pub use ids::*;
pub use logged_work::*;
pub use project::*;
pub use sync::*;
pub use user::*;

mod extractor;
mod router;

pub use extractor::{AdminUser, AuthUser};
pub use router::router;

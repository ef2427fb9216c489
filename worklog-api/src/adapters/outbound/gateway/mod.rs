//! Implementations of the ProjectGateway port used by the contributor
//! synchronizer.

mod conversions;
mod http;
mod store;

pub use http::HttpProjectGateway;
pub use store::StoreProjectGateway;

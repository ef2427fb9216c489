mod error;
pub mod models;
mod password;
pub mod ports;
pub mod services;

pub use error::*;
pub use password::*;

//! Error handling for the Bhabhi engine.

pub mod domain;
pub mod error_code;

pub use domain::GameError;
pub use error_code::ErrorCode;

pub mod error;
pub mod logger;
pub mod note;
pub mod validation;

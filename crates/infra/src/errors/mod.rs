//! Infrastructure error handling

pub mod conversions;

pub use conversions::{classify_service_error, InfraError};

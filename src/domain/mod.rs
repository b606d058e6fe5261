//! Domain layer - Pure business abstractions
//!
//! This layer contains NO transport dependencies (no reqwest).
//! Only trait definitions and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::{FormError, FormField, RequestError};
pub use repositories::*;

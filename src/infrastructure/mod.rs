//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Repository implementations (repositories)
//! - Tracked background requests (tasks)

pub mod config;
pub mod repositories;
pub mod tasks;

pub use repositories::*;
pub use tasks::{RequestId, Tasks};

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod ui;

pub use infrastructure::config;
pub use infrastructure::repositories::book_repository;

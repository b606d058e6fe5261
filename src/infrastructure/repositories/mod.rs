//! Repository implementations over HTTP

pub mod book_repository;

pub use book_repository::HttpBookRepository;

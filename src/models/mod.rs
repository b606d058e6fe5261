pub mod book;

pub use book::{Book, BookId, Category, CreateBookFragment, Isbn};

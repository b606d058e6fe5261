//! Services Layer
//!
//! Client-side state and workflows with no I/O of their own.

pub mod book_form;
pub mod book_list;

// Re-export for convenience
pub use book_form::{BookForm, FormMode, SubmitTarget, Submission};
pub use book_list::BookList;

//! Domain error types
//!
//! These errors are transport-agnostic and represent user-facing failures.

use thiserror::Error;

use crate::models::Category;

/// A remote call failed.
///
/// Transport failures, non-success statuses and undecodable bodies all
/// collapse into this one value. The cause is logged where it happens and
/// never carried to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request failed")]
pub struct RequestError;

/// The four editable fields of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Author,
    Category,
    Isbn,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Author,
        FormField::Category,
        FormField::Isbn,
    ];

    /// Help text shown under a field flagged as missing.
    pub fn missing_message(&self) -> &'static str {
        match self {
            FormField::Title => "Please, enter the title",
            FormField::Author => "Please, enter the author",
            FormField::Category => "Please, choose the category",
            FormField::Isbn => "Please, enter the ISBN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Submission attempted with unset fields.
    #[error("missing fields: {0:?}")]
    Incomplete(Vec<FormField>),
    /// Category not offered by the selector.
    #[error("unknown category: {0}")]
    UnknownCategory(Category),
}

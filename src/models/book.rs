use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Server-assigned identifier of a catalog record.
pub type BookId = i64;

/// Category label. The API stores whatever the form sent, so both JSON
/// strings and JSON numbers (integer or not) show up in practice. Numbers
/// are kept as received and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Number(Number),
    Text(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Number(n) => write!(f, "{}", n),
            Category::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::Text(value.to_string())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::Text(value)
    }
}

/// ISBN as returned by the API: a numeric string, or a bare JSON number for
/// records created by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Isbn {
    Number(Number),
    Text(String),
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Isbn::Number(n) => write!(f, "{}", n),
            Isbn::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One catalog record as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub isbn: Isbn,
}

/// Payload for create/update submissions: a book without its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookFragment {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub isbn: Isbn,
}

impl CreateBookFragment {
    /// Attach a server-assigned id.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            isbn: self.isbn,
        }
    }
}

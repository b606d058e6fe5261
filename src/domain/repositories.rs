//! Repository trait definitions
//!
//! These traits define the contract for talking to the remote catalog.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::RequestError;
use crate::models::{Book, BookId, CreateBookFragment};

/// Remote book catalog.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Fetch every book, in server order.
    async fn list(&self) -> Result<Vec<Book>, RequestError>;

    /// Persist a book. The server assigns or confirms the id.
    async fn create_or_update(&self, fragment: CreateBookFragment) -> Result<Book, RequestError>;

    /// Delete a book. The acknowledgement body is opaque.
    async fn delete(&self, id: BookId) -> Result<serde_json::Value, RequestError>;
}

//! Book persistence behind an injected trait object.

mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::{ensure_database_exists, PgBookStore};

use crate::error::StoreError;
use crate::model::{Book, BookChanges, NewBook};
use async_trait::async_trait;

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every stored book, oldest id first.
    async fn all(&self) -> Result<Vec<Book>, StoreError>;
    /// Persists a new book and returns it with its assigned id and timestamps.
    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;
    /// `Ok(None)` when no book has this id.
    async fn find(&self, id: i64) -> Result<Option<Book>, StoreError>;
    /// Overwrites the fields present in `changes`. `Ok(None)` if the book vanished.
    async fn update(&self, id: i64, changes: &BookChanges) -> Result<Option<Book>, StoreError>;
    /// Hard delete. Returns false if there was nothing to remove.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

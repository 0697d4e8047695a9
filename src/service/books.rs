//! Endpoint-facing book operations over an injected store.

use crate::error::AppError;
use crate::model::Book;
use crate::service::{book_changes, new_book};
use crate::store::BookStore;
use serde_json::Value;
use std::sync::Arc;

/// Owns the per-request ordering: look the book up, then validate, then write.
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BookStore> {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.store.all().await?)
    }

    pub async fn create(&self, body: Value) -> Result<Book, AppError> {
        let input = new_book(body)?;
        let book = self.store.create(input).await?;
        tracing::info!(id = book.id, "book created");
        Ok(book)
    }

    pub async fn show(&self, id: &str) -> Result<Book, AppError> {
        self.find(id).await
    }

    /// `body` is only validated once the book is known to exist.
    pub async fn update(&self, id: &str, body: Value) -> Result<Book, AppError> {
        let book = self.find(id).await?;
        let changes = book_changes(body)?.dirty_against(&book);
        if changes.is_empty() {
            tracing::debug!(id = book.id, "update without changes");
            return Ok(book);
        }
        let updated = self
            .store
            .update(book.id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        tracing::info!(id = updated.id, "book updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let book = self.find(id).await?;
        if !self.store.delete(book.id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!(id = book.id, "book deleted");
        Ok(())
    }

    /// A path id that is not an integer cannot name a book.
    async fn find(&self, id: &str) -> Result<Book, AppError> {
        let Ok(key) = id.trim().parse::<i64>() else {
            return Err(AppError::NotFound(id.to_string()));
        };
        self.store
            .find(key)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}

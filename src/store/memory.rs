//! In-process store. Used when no database is configured and in tests.

use super::BookStore;
use crate::error::StoreError;
use crate::model::{Book, BookChanges, NewBook};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    books: BTreeMap<i64, Book>,
    last_id: i64,
}

/// Ids start at 1 and are never reused, even after delete.
#[derive(Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let book = Book {
            id: inner.last_id,
            title: book.title,
            author: book.author,
            description: book.description,
            created_at: now,
            updated_at: now,
        };
        inner.books.insert(book.id, book.clone());
        tracing::debug!(id = book.id, "book inserted");
        Ok(book)
    }

    async fn find(&self, id: i64) -> Result<Option<Book>, StoreError> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &BookChanges) -> Result<Option<Book>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(book) = inner.books.get_mut(&id) else {
            return Ok(None);
        };
        if changes.apply_to(book) {
            book.updated_at = Utc::now();
        }
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

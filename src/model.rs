//! Book record and the validated inputs that create or change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted book. Plain data: persistence lives in [`crate::store`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a book about to be created. Built only from validated input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

/// Partial update. `None` keeps the stored value; for `description`,
/// `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<Option<String>>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.description.is_none()
    }

    /// Drops every change that would leave `book` as it is.
    pub fn dirty_against(self, book: &Book) -> Self {
        Self {
            title: self.title.filter(|t| *t != book.title),
            author: self.author.filter(|a| *a != book.author),
            description: self.description.filter(|d| *d != book.description),
        }
    }

    /// Applies the changes in place. Returns true when anything was overwritten.
    pub fn apply_to(&self, book: &mut Book) -> bool {
        let mut changed = false;
        if let Some(title) = &self.title {
            book.title.clone_from(title);
            changed = true;
        }
        if let Some(author) = &self.author {
            book.author.clone_from(author);
            changed = true;
        }
        if let Some(description) = &self.description {
            book.description.clone_from(description);
            changed = true;
        }
        changed
    }
}

/// Request body of `POST /api/books`, for the OpenAPI document only.
#[derive(ToSchema)]
pub struct CreateBookRequest {
    #[schema(max_length = 255)]
    pub title: String,
    #[schema(max_length = 255)]
    pub author: String,
    pub description: Option<String>,
}

/// Request body of `PUT /api/books/{id}`, for the OpenAPI document only.
#[derive(ToSchema)]
pub struct UpdateBookRequest {
    #[schema(max_length = 255)]
    pub title: Option<String>,
    #[schema(max_length = 255)]
    pub author: Option<String>,
    pub description: Option<String>,
}

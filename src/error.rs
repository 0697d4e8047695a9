//! Typed errors and HTTP mapping.

use crate::response::message;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Book not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Failure of the backing store. Never shown to clients.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(String),
}

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
    first: Option<String>,
    count: usize,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, msg: String) {
        if self.first.is_none() {
            self.first = Some(msg.clone());
        }
        self.count += 1;
        self.fields.entry(field.to_string()).or_default().push(msg);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Summary line: the first message, plus how many others follow.
    pub fn summary(&self) -> String {
        let first = self.first.clone().unwrap_or_else(|| "The given data was invalid.".into());
        match self.count.saturating_sub(1) {
            0 => first,
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("book {0} not found")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(StoreError::Db(e))
    }
}

#[derive(Serialize)]
pub struct ValidationBody {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(id) => {
                tracing::debug!(id = %id, "book not found");
                message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
            }
            AppError::Validation(errors) => {
                let body = ValidationBody {
                    message: errors.summary(),
                    errors: errors.fields,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_has_fixed_message() {
        let resp = AppError::NotFound("42".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({"message": "Book not found"}));
    }

    #[tokio::test]
    async fn validation_lists_every_field() {
        let mut errors = ValidationErrors::default();
        errors.add("title", "The title field is required.".into());
        errors.add("author", "The author field must be a string.".into());
        let resp = AppError::Validation(errors).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(resp).await,
            json!({
                "message": "The title field is required. (and 1 more error)",
                "errors": {
                    "author": ["The author field must be a string."],
                    "title": ["The title field is required."]
                }
            })
        );
    }

    #[tokio::test]
    async fn store_errors_do_not_leak() {
        let resp = AppError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({"message": "Server Error"}));
    }

    #[test]
    fn summary_counts_remaining_errors() {
        let mut errors = ValidationErrors::default();
        errors.add("title", "a".into());
        errors.add("title", "b".into());
        errors.add("author", "c".into());
        assert_eq!(errors.summary(), "a (and 2 more errors)");
        assert_eq!(errors.field("title").map(<[String]>::len), Some(2));
    }
}

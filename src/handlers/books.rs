//! Book CRUD handlers: list, create, show, update, delete.

use crate::error::AppError;
use crate::model::{Book, CreateBookRequest, UpdateBookRequest};
use crate::response::{created, message, ok, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

pub const DELETED_MESSAGE: &str = "Book deleted Successfully";

/// A missing or unreadable body counts as an empty object and goes through the rule table.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(v)) => v,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable body treated as empty");
            Value::Object(Map::new())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses((status = 200, description = "All books", body = [Book]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list().await?;
    Ok(ok(books))
}

#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let book = state.books.create(json_body(body)).await?;
    Ok(created(book))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Book not found", body = MessageBody)
    )
)]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let book = state.books.show(&id).await?;
    Ok(ok(book))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = MessageBody),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let book = state.books.update(&id, json_body(body)).await?;
    Ok(ok(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = MessageBody),
        (status = 404, description = "Book not found", body = MessageBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.books.delete(&id).await?;
    Ok(message(StatusCode::OK, DELETED_MESSAGE))
}

//! Books resource routes under `/api/books`.

use crate::handlers::books::{create, delete as delete_handler, list, show, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/books", get(list).post(create))
        .route(
            "/api/books/:id",
            get(show).put(update).patch(update).delete(delete_handler),
        )
        .with_state(state)
}

//! Shared application state for all routes. Holds no per-request data.

use crate::service::BookService;
use crate::store::BookStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            books: BookService::new(store),
        }
    }
}

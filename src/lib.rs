//! Bookshelf: JSON CRUD API for a single `Book` resource.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod factory;

pub use error::{AppError, ConfigError, StoreError, ValidationErrors};
pub use migration::apply_migrations;
pub use model::{Book, BookChanges, NewBook};
pub use routes::{app, book_routes, common_routes};
pub use service::BookService;
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_database_exists, BookStore, MemoryBookStore, PgBookStore};

//! Book operations and request validation.

mod books;
mod validation;
pub use books::BookService;
pub use validation::{book_changes, new_book, FieldRule, Presence, RequestValidator, CREATE_RULES, UPDATE_RULES};

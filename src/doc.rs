//! OpenAPI document for the books API.

use crate::handlers::books;
use crate::model::{Book, CreateBookRequest, UpdateBookRequest};
use crate::response::MessageBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(books::list, books::create, books::show, books::update, books::delete),
    components(schemas(Book, CreateBookRequest, UpdateBookRequest, MessageBody)),
    tags((name = "books", description = "Book CRUD"))
)]
pub struct ApiDoc;

//! Randomized books for test setup.

use crate::error::StoreError;
use crate::model::{Book, NewBook};
use crate::store::BookStore;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;

/// Chance that a generated book carries a description.
const DESCRIPTION_PROBABILITY: f64 = 0.5;

pub struct BookFactory;

impl BookFactory {
    /// A valid create input: sentence title, person-name author, optional paragraph.
    pub fn definition() -> NewBook {
        let mut rng = rand::rng();
        let description = rng
            .random_bool(DESCRIPTION_PROBABILITY)
            .then(|| Paragraph(2..4).fake::<String>());
        NewBook {
            title: Sentence(3..7).fake(),
            author: Name().fake(),
            description,
        }
    }

    /// Persist one generated book.
    pub async fn create(store: &dyn BookStore) -> Result<Book, StoreError> {
        store.create(Self::definition()).await
    }

    /// Persist `count` generated books, returned in creation order.
    pub async fn create_many(store: &dyn BookStore, count: usize) -> Result<Vec<Book>, StoreError> {
        let mut books = Vec::with_capacity(count);
        for _ in 0..count {
            books.push(Self::create(store).await?);
        }
        Ok(books)
    }
}

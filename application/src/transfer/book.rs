use rust_decimal::Decimal;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: Decimal,
    pub description: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            genre,
            price,
            description,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            price: price.into(),
            description: description.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: Decimal,
    pub description: String,
}

pub struct UpdateBookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: Decimal,
    pub description: String,
}

pub struct DeleteBookDto {
    pub id: i64,
}

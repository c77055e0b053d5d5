mod author;
mod description;
mod genre;
mod id;
mod title;

pub use self::{author::*, description::*, genre::*, id::*, title::*};
use crate::entity::Price;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    genre: BookGenre,
    price: Price,
    description: BookDescription,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        genre: BookGenre,
        price: Price,
        description: BookDescription,
    ) -> Self {
        Self {
            id,
            title,
            author,
            genre,
            price,
            description,
        }
    }
}

use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::ConvertError;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let books = con.books.read().convert_error()?;
        Ok(books.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = con.books.read().convert_error()?;
        Ok(books.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().convert_error()?;
        if books.contains_key(book.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("book {} already exists", book.id().as_ref())));
        }
        books.insert(*book.id(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().convert_error()?;
        match books.get_mut(book.id()) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", book.id().as_ref()))),
        }
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.write().convert_error()?;
        books.remove(book_id).map(|_| ()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", book_id.as_ref()))
        })
    }
}
